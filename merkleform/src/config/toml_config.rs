//! module for handling file-based (TOML) configuration for merkleform.

use std::fs;

use super::{Deserialize, LogFormat, LogLevel, TomlCommand};
use crate::util;

#[derive(Debug, thiserror::Error)]
pub enum TomlConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TomlConfig {
    #[serde(default)]
    pub core: CoreConfig,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CoreConfig {
    pub command: Option<TomlCommand>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub rpc_laddr: Option<String>,
}

/// Read the TOML configuration file, if present in the `config` sub-directory under the
/// root merkleform directory.
pub(super) fn read_config(root_dir: &str) -> Result<Option<TomlConfig>, TomlConfigError> {
    let Some(config_file) = util::get_toml_config_file(root_dir, "config") else {
        return Ok(None);
    };

    if !config_file.exists() {
        return Ok(None);
    }

    Ok(Some(toml::from_str::<TomlConfig>(
        fs::read_to_string(config_file)?.as_str(),
    )?))
}
