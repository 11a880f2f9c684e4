//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the command-line run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The seed file could not be read.
    #[error("Cannot read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The seed file is not valid JSON for a seed.
    #[error("Invalid seed file {path}: {source}")]
    SeedFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The seed parsed but holds values the stores must not contain.
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// Reading requests or writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A result could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
