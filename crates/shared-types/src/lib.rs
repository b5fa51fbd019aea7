//! # Shared Types Crate
//!
//! This crate contains the types that cross subsystem boundaries in the
//! sync pipeline: the [`ChangeEvent`] wire envelope, the canonical entity
//! model and identity-map rows.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Opaque Payloads**: A change event's `data` stays a serialized string
//!   until the entity type is known; only the registered transformer reads it.
//! - **Explicit Emission**: Writes carry an [`Emit`] decision per call instead
//!   of mutable repository state.

pub mod clock;
pub mod entities;
pub mod envelope;
pub mod errors;

pub use clock::now_timestamp;
pub use entities::*;
pub use envelope::{ChangeEvent, OperationKind, SourceSystem};
pub use errors::*;

/// Default topic carrying change events.
pub const DEFAULT_TOPIC: &str = "crud-channel";
