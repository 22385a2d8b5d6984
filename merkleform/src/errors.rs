use leafcodec::verify::VerifyError;

use crate::config::ConfigError;

mod code;
pub mod http;
pub mod logger;
pub mod reason;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to load config")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Leaf(#[from] leafcodec::Error),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("tracing parse error")]
    TracingParse(#[from] tracing_subscriber::filter::ParseError),

    #[error("error setting tracing global subscriber")]
    TracingSetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}
