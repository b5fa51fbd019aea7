//! # Domain Errors

use cs_01_change_capture::CaptureError;
use thiserror::Error;

/// A canonical store read or write failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Writing a canonical student failed.
    #[error("Failed to persist canonical student {canonical_id}: {source}")]
    Student {
        canonical_id: String,
        source: CaptureError,
    },

    /// Writing an identity-map row failed.
    #[error("Failed to persist identity mapping {canonical_id}: {source}")]
    Mapping {
        canonical_id: String,
        source: CaptureError,
    },

    /// A query failed.
    #[error("Canonical store read failed: {0}")]
    Read(#[from] CaptureError),
}
