//! # Change Event Envelope
//!
//! The flat record carried on the message channel for every create, update or
//! delete on a system-of-record entity.
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "entity":    "Estudante",
//!   "operation": "CREATE" | "UPDATE" | "DELETE",
//!   "source":    "ORM" | "ODM",
//!   "data":      "{\"id\":\"42\",...}",   // nested serialized snapshot
//!   "timestamp": "2024-05-02T10:00:00.000Z"
//! }
//! ```
//!
//! `data` is opaque until `entity` is known. Ordering is only as strong as the
//! channel's per-topic delivery order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::now_timestamp;
use crate::errors::DecodeError;

/// Kind of write that produced a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    #[serde(rename = "CREATE")]
    Create,
    #[serde(rename = "UPDATE")]
    Update,
    #[serde(rename = "DELETE")]
    Delete,
}

impl OperationKind {
    /// Wire name of the operation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// System-of-record that originated a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    /// ORM-backed relational system-of-record.
    #[serde(rename = "ORM")]
    SourceA,
    /// Document-store system-of-record.
    #[serde(rename = "ODM")]
    SourceB,
}

impl SourceSystem {
    /// Wire name of the source.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceA => "ORM",
            Self::SourceB => "ODM",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured notification of a write on a system-of-record entity.
///
/// Transient: never persisted beyond the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Entity type tag (e.g. `"Estudante"`).
    #[serde(rename = "entity")]
    pub entity_type: String,
    /// Write kind.
    pub operation: OperationKind,
    /// Originating system.
    pub source: SourceSystem,
    /// Serialized entity snapshot.
    #[serde(rename = "data")]
    pub payload: String,
    /// Capture time, ISO-8601.
    pub timestamp: String,
}

impl ChangeEvent {
    /// Build an event stamped with the current time.
    pub fn new(
        entity_type: impl Into<String>,
        operation: OperationKind,
        source: SourceSystem,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            operation,
            source,
            payload: payload.into(),
            timestamp: now_timestamp(),
        }
    }

    /// Serialize to the channel's flat JSON record.
    pub fn encode(&self) -> Result<String, DecodeError> {
        serde_json::to_string(self).map_err(|e| DecodeError::Malformed {
            message: e.to_string(),
        })
    }

    /// Parse a channel message body.
    ///
    /// The `data` field is not inspected beyond being a string.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let event: Self = serde_json::from_str(raw).map_err(|e| DecodeError::Malformed {
            message: e.to_string(),
        })?;
        if event.entity_type.trim().is_empty() {
            return Err(DecodeError::EmptyEntityType);
        }
        Ok(event)
    }
}
