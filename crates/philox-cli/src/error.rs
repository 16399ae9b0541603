//! Error types for the Philox CLI.

use philox_core::PhiloxError;
use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the generator library.
    #[error(transparent)]
    Philox(#[from] PhiloxError),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Checkpoint file could not be read.
    #[error("Invalid checkpoint {path}: {reason}")]
    InvalidCheckpoint {
        /// Checkpoint path.
        path: String,
        /// Why decoding failed.
        reason: String,
    },
}
