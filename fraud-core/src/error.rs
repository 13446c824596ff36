//! Error types for the fraud core

use thiserror::Error;

/// Result type for fraud-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fraud core errors
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed check input, rejected before scoring
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Alert store failure
    #[error("Alert store error: {0}")]
    Store(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
