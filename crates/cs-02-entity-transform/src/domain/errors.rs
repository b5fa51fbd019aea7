//! # Domain Errors

use thiserror::Error;

/// A payload could not be transformed. Dispatch must be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Payload is not valid JSON.
    #[error("Payload is not valid JSON: {message}")]
    InvalidJson { message: String },

    /// Payload is valid JSON but not an object.
    #[error("Payload for {entity} must be a JSON object")]
    NotAnObject { entity: String },

    /// A known field has the wrong JSON type.
    #[error("Field `{field}` has unexpected type (expected {expected})")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    /// No transformer is registered for the entity type.
    #[error("No transformer registered for entity type {entity}")]
    UnsupportedEntity { entity: String },
}
