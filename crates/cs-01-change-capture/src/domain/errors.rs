//! # Domain Errors

use thiserror::Error;

/// Errors raised by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// I/O error during read/write.
    #[error("Record store I/O error: {message}")]
    Io { message: String },

    /// Persisted data could not be read back.
    #[error("Record store corruption: {message}")]
    Corruption { message: String },

    /// Create on a key that is already present.
    #[error("Record already exists: {key}")]
    AlreadyExists { key: String },

    /// Update or delete on a key that is absent.
    #[error("Record not found: {key}")]
    NotFound { key: String },

    /// Another process holds the store.
    #[error("Record store locked: {path}")]
    Locked { path: String },
}

/// Errors returned by repository operations.
///
/// Publication failures are not errors: they are logged and reported through
/// [`WriteReceipt::published`](crate::WriteReceipt).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The underlying write or read failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Entity could not be serialized or a stored record deserialized.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        CaptureError::Serialization {
            message: err.to_string(),
        }
    }
}
