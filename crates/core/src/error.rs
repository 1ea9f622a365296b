//! Error types for the pairwise library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the pairwise library.
///
/// The training algorithms themselves are total; errors come from
/// configuration, trainer misuse, token table bookkeeping and persistence.
#[derive(Error, Debug)]
pub enum PairwiseError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Trainer used out of order
    #[error("Training error: {0}")]
    Training(String),

    /// Token rejected by the token table
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Unknown token string
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// Error loading a model or corpus
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a model
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PairwiseError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for pairwise operations.
pub type Result<T> = std::result::Result<T, PairwiseError>;
