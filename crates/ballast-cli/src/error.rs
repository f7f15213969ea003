//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Payload file could not be read.
    #[error("Cannot read payload {}: {source}", path.display())]
    ReadPayload {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Invalid `--top-n` value.
    #[error("Invalid top-n: {0}. Must be at least 1.")]
    InvalidTopN(usize),

    /// Unknown risk profile.
    #[error("Unknown profile '{profile}'. Known profiles: {known}")]
    UnknownProfile {
        /// Profile given on the command line.
        profile: String,
        /// Comma-separated profiles from the configuration.
        known: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
