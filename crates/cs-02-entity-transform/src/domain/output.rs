//! Transformer output.

use shared_types::StudentProfile;

/// Result of a successful transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// JSON body to send to the remote system.
    pub target_payload: serde_json::Value,
    /// Canonical candidate, for entity types that are canonicalized.
    pub canonical: Option<StudentProfile>,
}
