//! # Entity Contract

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::OperationKind;

/// A record managed by a [`Repository`](crate::Repository).
///
/// The serialized form is both the stored record and the change-event
/// snapshot.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Entity type tag carried in change events.
    const ENTITY_TYPE: &'static str;

    /// Primary key, unique within the entity type.
    fn key(&self) -> String;
}

/// Outcome of a successful repository write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    /// Kind of write performed.
    pub operation: OperationKind,
    /// Store key written.
    pub key: String,
    /// Whether a change event was accepted by the channel.
    pub published: bool,
    /// Subscribers that received the event.
    pub receivers: usize,
}
