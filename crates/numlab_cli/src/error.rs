//! CLI error types.

use numlab_core::NumericError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `numlab` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The numerical method failed.
    #[error(transparent)]
    Numeric(#[from] NumericError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command-line value could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file named on the command line does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A problem file could not be parsed.
    #[error("Invalid problem file: {0}")]
    Problem(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    /// `numlab check` found failing reference problems.
    #[error("{0} reference check(s) failed")]
    CheckFailed(usize),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
