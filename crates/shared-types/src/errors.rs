//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// A channel message could not be decoded into a change event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Body is not a valid change-event record.
    #[error("Malformed change event: {message}")]
    Malformed { message: String },

    /// The `entity` tag is empty.
    #[error("Change event has an empty entity type")]
    EmptyEntityType,
}
