//! # Event Subscriber
//!
//! Defines the subscription side of the message channel.

use crate::events::{ChannelMessage, EventFilter};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The channel was closed.
    #[error("Channel closed")]
    Closed,
}

/// A subscription handle for receiving messages.
///
/// Owns a bounded queue fed by the bus. Dropping the handle unregisters it;
/// later publishes skip it.
pub struct Subscription {
    /// Queue of messages that already passed the filter.
    receiver: mpsc::Receiver<ChannelMessage>,

    /// Filter for this subscription.
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: mpsc::Receiver<ChannelMessage>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next message that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(message)` - The next matching message
    /// - `None` - The channel was closed and drained
    pub async fn recv(&mut self) -> Option<ChannelMessage> {
        self.receiver.recv().await
    }

    /// Try to receive the next message without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` - A message was available
    /// - `Ok(None)` - No message available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed and drained
    pub fn try_recv(&mut self) -> Result<Option<ChannelMessage>, SubscriptionError> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(SubscriptionError::Closed),
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
