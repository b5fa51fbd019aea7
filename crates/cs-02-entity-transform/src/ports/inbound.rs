//! # Inbound Ports (Driving Ports)

use crate::domain::{TransformError, TransformOutput};

/// Per-entity-type mapping from a source snapshot to target and canonical
/// schemas.
///
/// Implementations are pure: same payload, same output.
pub trait EntityTransformer: Send + Sync {
    /// Entity type tag this transformer handles.
    fn entity_type(&self) -> &str;

    /// Transform a serialized source snapshot.
    fn transform(&self, payload: &str) -> Result<TransformOutput, TransformError>;
}
