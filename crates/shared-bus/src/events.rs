//! # Channel Messages
//!
//! The unit carried by the bus: a topic name and an opaque body.

use shared_types::{ChangeEvent, DecodeError};

/// A message published on one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    /// Topic the message was published on.
    pub topic: String,
    /// Raw message body (a serialized change event on the CRUD topic).
    pub body: String,
}

impl ChannelMessage {
    pub fn new(topic: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            body: body.into(),
        }
    }

    /// Encode a change event onto `topic`.
    pub fn from_event(topic: impl Into<String>, event: &ChangeEvent) -> Result<Self, DecodeError> {
        Ok(Self::new(topic, event.encode()?))
    }
}

/// Filter for subscribing to a subset of topics.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to receive. Empty means all topics.
    pub topics: Vec<String>,
}

impl EventFilter {
    /// Receive messages on every topic.
    #[must_use]
    pub fn all() -> Self {
        Self { topics: Vec::new() }
    }

    /// Receive messages on a single topic.
    #[must_use]
    pub fn topic(topic: impl Into<String>) -> Self {
        Self {
            topics: vec![topic.into()],
        }
    }

    /// Check if a message matches this filter.
    #[must_use]
    pub fn matches(&self, message: &ChannelMessage) -> bool {
        self.topics.is_empty() || self.topics.iter().any(|t| *t == message.topic)
    }
}
