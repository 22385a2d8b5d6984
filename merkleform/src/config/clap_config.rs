use clap::{Arg, ArgMatches, Command};

use super::{LogFormat, LogLevel};

/// Low-level `clap` command, which gives us `value_source` to tell whether an option was set by
/// the user (cli/env) or by its default value.
///
/// This covers the core configuration that is supported for the cli, env, and TOML (file-based)
/// configuration.
pub(super) fn command() -> Command {
    Command::new("merkleform")
        .about("Build, prove and verify salted Merkle trees of typed values")
        .version(env!("CARGO_PKG_VERSION"))
        .propagate_version(true)
        .subcommand(Command::new("start").about("Start the HTTP server"))
        .subcommand(
            Command::new("encode")
                .about("Salt a JSON list of rows and build their tree")
                .arg(input_arg("Rows to encode, as JSON")),
        )
        .subcommand(
            Command::new("prove")
                .about("Prove rows of an exported tree")
                .arg(input_arg("Exported tree, as JSON"))
                .arg(
                    Arg::new("indices")
                        .help("Rows to prove, defaults to the checked rows")
                        .long("indices")
                        .value_name("INDICES")
                        .value_parser(clap::value_parser!(usize))
                        .value_delimiter(','),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verify a proof against a root")
                .arg(input_arg("Proof to verify, as JSON"))
                .arg(
                    Arg::new("root")
                        .help("Root of the tree, as hex")
                        .long("root")
                        .value_name("ROOT")
                        .required(true)
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .arg(
            Arg::new("root-dir")
                .help("Root directory where configuration is stored")
                .short('r')
                .long("root-dir")
                .value_name("ROOT_DIR")
                .env("ROOT_DIR")
                .value_parser(clap::value_parser!(String))
                .default_value("~/.merkleform"),
        )
        .arg(
            Arg::new("log-level")
                .help("Log level")
                .long("log-level")
                .value_name("LOG_LEVEL")
                .env("LOG_LEVEL")
                .value_parser(clap::builder::EnumValueParser::<LogLevel>::new())
                .default_value("INFO"),
        )
        .arg(
            Arg::new("log-format")
                .help("Log format")
                .long("log-format")
                .value_name("LOG_FORMAT")
                .env("LOG_FORMAT")
                .value_parser(clap::builder::EnumValueParser::<LogFormat>::new())
                .default_value("PRETTY"),
        )
        .arg(
            Arg::new("rpc-laddr")
                .help("RPC listen address")
                .long("rpc-laddr")
                .value_name("RPC_LADDR")
                .env("RPC_LADDR")
                .value_parser(clap::value_parser!(String))
                .default_value("0.0.0.0:8080"),
        )
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .long_help(format!("{help} (`-` reads stdin)"))
        .value_name("FILE")
        .value_parser(clap::value_parser!(String))
        .default_value("-")
}

pub(super) fn get_matches() -> ArgMatches {
    command().get_matches()
}
