//! Store error types

use thiserror::Error;

/// Errors that can occur in the keyed store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Serialized document exceeds the per-document quota
    #[error("Document '{key}' is {size} bytes, exceeding the {limit} byte quota")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    /// Data corruption detected (checksum mismatch, bad header)
    #[error("Corrupt document: {0}")]
    Corruption(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
