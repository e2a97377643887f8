//! Store error types.

use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No stored payload under this name.
    #[error("No stored payload named {0}")]
    NotFound(String),
}

impl From<rinkstat_core::CoreError> for StoreError {
    fn from(err: rinkstat_core::CoreError) -> Self {
        StoreError::Config(err.to_string())
    }
}
