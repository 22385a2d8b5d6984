//! Configuration for merkleform - using the CLI (clap), env (clap), and configuration file (toml).

mod clap_config;
mod toml_config;

use clap::{parser::ValueSource, ArgMatches, ValueEnum};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("toml config error")]
    TomlConfig(#[from] toml_config::TomlConfigError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Option<MerkleformCommand>,

    /// Root directory where configuration is stored
    pub root_dir: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// RPC listen address
    pub rpc_laddr: String,
}

impl Config {
    pub fn new() -> ConfigResult<Self> {
        Self::from_matches(clap_config::get_matches())
    }

    fn from_matches(matches: ArgMatches) -> ConfigResult<Self> {
        let mut config: Config = matches.clone().into();
        config.merge_toml_core_config(&matches)?;

        Ok(config)
    }

    fn was_supplied_by_user(key: &str, matches: &ArgMatches) -> bool {
        !matches!(matches.value_source(key), Some(ValueSource::DefaultValue))
    }

    /// The order of priority is (in decreasing order):
    /// cli -> env -> toml -> default
    ///
    /// A field is only taken from the TOML config if it wasn't supplied by the user, and the TOML
    /// config has a value for it.
    fn merge_toml_core_config(&mut self, matches: &ArgMatches) -> ConfigResult<()> {
        let Some(toml_config) = toml_config::read_config(&self.root_dir)? else {
            return Ok(());
        };
        let core = toml_config.core;

        if self.command.is_none() && core.command == Some(TomlCommand::Start) {
            self.command = Some(MerkleformCommand::Start);
        }

        if let Some(log_level) = core.log_level {
            if !Self::was_supplied_by_user("log-level", matches) {
                self.log_level = log_level;
            }
        }

        if let Some(log_format) = core.log_format {
            if !Self::was_supplied_by_user("log-format", matches) {
                self.log_format = log_format;
            }
        }

        if let Some(rpc_laddr) = core.rpc_laddr {
            if !Self::was_supplied_by_user("rpc-laddr", matches) {
                self.rpc_laddr = rpc_laddr;
            }
        }

        Ok(())
    }
}

// `clap` does not provide an automated way to convert from `ArgMatches` in builder mode. Every
// unwrapped argument has a default value or is required.
#[allow(clippy::unwrap_used)]
impl From<ArgMatches> for Config {
    fn from(am: ArgMatches) -> Self {
        Config {
            command: match am.subcommand() {
                Some(("start", _)) => Some(MerkleformCommand::Start),
                Some(("encode", sub)) => Some(MerkleformCommand::Encode {
                    input: sub.get_one::<String>("input").unwrap().clone(),
                }),
                Some(("prove", sub)) => Some(MerkleformCommand::Prove {
                    input: sub.get_one::<String>("input").unwrap().clone(),
                    indices: sub
                        .get_many::<usize>("indices")
                        .map(|indices| indices.copied().collect()),
                }),
                Some(("verify", sub)) => Some(MerkleformCommand::Verify {
                    root: sub.get_one::<String>("root").unwrap().clone(),
                    input: sub.get_one::<String>("input").unwrap().clone(),
                }),
                _ => None,
            },

            root_dir: am.get_one::<String>("root-dir").unwrap().clone(),
            log_level: *am.get_one::<LogLevel>("log-level").unwrap(),
            log_format: *am.get_one::<LogFormat>("log-format").unwrap(),
            rpc_laddr: am.get_one::<String>("rpc-laddr").unwrap().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleformCommand {
    /// Start the HTTP server
    Start,
    /// Salt rows and build their tree
    Encode { input: String },
    /// Prove rows of an exported tree
    Prove {
        input: String,
        indices: Option<Vec<usize>>,
    },
    /// Verify a proof against a root
    Verify { root: String, input: String },
}

/// The only command that can be set from the TOML config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TomlCommand {
    #[serde(rename = "start")]
    Start,
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize, ValueEnum)]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    #[serde(rename = "DEBUG")]
    Debug,
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ERROR")]
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for this level
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Deserialize)]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogFormat {
    #[serde(rename = "PRETTY")]
    Pretty,
    #[serde(rename = "JSON")]
    Json,
}
