//! Error types for snapshot and schema storage.

use thiserror::Error;

/// Errors that can occur while reading or writing snapshot artifacts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally invalid input, e.g. a `{version}` path placeholder with
    /// no version to substitute.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
