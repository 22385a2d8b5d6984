#![warn(clippy::unwrap_used, clippy::expect_used)]

mod cli;
mod config;
mod errors;
mod rpc;
mod util;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat, LogLevel, MerkleformCommand};
use crate::errors::Result;

fn setup_tracing(log_level: LogLevel, log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level.as_directive())?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr);

    match log_format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;
    setup_tracing(config.log_level, config.log_format)?;

    match config.command.unwrap_or(MerkleformCommand::Start) {
        MerkleformCommand::Start => {
            info!(laddr = %config.rpc_laddr, version = env!("CARGO_PKG_VERSION"), "starting server");
            rpc::server(&config.rpc_laddr)?.await?;
        }
        MerkleformCommand::Encode { input } => {
            cli::encode(util::open_input(&input)?, io::stdout().lock())?;
        }
        MerkleformCommand::Prove { input, indices } => {
            cli::prove(
                util::open_input(&input)?,
                indices.as_deref(),
                io::stdout().lock(),
            )?;
        }
        MerkleformCommand::Verify { root, input } => {
            cli::verify(&root, util::open_input(&input)?, io::stdout().lock())?;
        }
    }

    Ok(())
}
