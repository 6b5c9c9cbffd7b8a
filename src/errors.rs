// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every failure that leaves the process core carries enough context (binary
//! path, full argument vector, captured diagnostic text) to re-run the
//! underlying command by hand.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardanoError {
    #[error("binary '{binary}' not found: {reason}")]
    BinaryNotFound { binary: String, reason: String },

    #[error("command failed: {} {}: {message}", program.display(), args.join(" "))]
    CommandFailed {
        program: PathBuf,
        args: Vec<String>,
        message: String,
    },

    #[error("command cancelled: {} {}", program.display(), args.join(" "))]
    Cancelled { program: PathBuf, args: Vec<String> },

    #[error("process '{binary}' is already running (pid {pid})")]
    ProcessAlreadyRunning { binary: String, pid: u32 },

    #[error("process handle for '{binary}' has already terminated; create a new handle to start again")]
    ProcessTerminated { binary: String },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("unsupported version of '{binary}': found {current}, need at least {minimum}")]
    UnsupportedVersion {
        binary: String,
        current: String,
        minimum: String,
    },

    #[error("file already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("failed to decode output of '{context}': {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected output from '{context}': {output}")]
    UnexpectedOutput { context: String, output: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CardanoError>;
