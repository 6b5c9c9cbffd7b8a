// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `cardano-runner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cardano-runner",
    version,
    about = "Locate, version-check and drive the Cardano command-line tools.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `cardano-runner.toml` in the current working directory. A
    /// missing default file means built-in defaults; a missing explicit path
    /// is an error.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CARDANO_RUNNER_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate the config and print what would run, without
    /// launching anything.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a config file with the defaults (plus environment overrides).
    Init {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Resolve every known binary and check it against its minimum version.
    Check,

    /// Print the chain tip as reported by `cardano-cli`.
    Tip,

    /// Run `cardano-node` until Ctrl-C, then stop it gracefully.
    Node,

    /// Print the raw version output of one binary (e.g. `cardano-cli`).
    Version {
        #[arg(value_name = "BINARY")]
        binary: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
