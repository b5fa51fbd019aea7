//! # Event Publisher
//!
//! Defines the publishing side of the message channel.

use crate::events::{ChannelMessage, EventFilter};
use crate::subscriber::{Subscription, SubscriptionError};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Errors from publish operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The channel is closed (not yet opened, or shut down).
    #[error("Channel closed")]
    Closed,
}

/// Trait for publishing messages to the channel.
///
/// Implemented by the in-memory bus; a networked broker would implement the
/// same trait.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a message.
    ///
    /// # Returns
    ///
    /// The number of subscribers whose queue accepted the message. Zero
    /// subscribers is not an error.
    async fn publish(&self, message: ChannelMessage) -> Result<usize, PublishError>;

    /// Get the total number of messages accepted by the channel.
    fn events_published(&self) -> u64;
}

/// One subscriber's bounded queue.
struct Slot {
    filter: EventFilter,
    sender: mpsc::Sender<ChannelMessage>,
}

/// In-memory implementation of the message channel.
///
/// Each subscription owns a bounded `tokio::sync::mpsc` queue of `capacity`
/// messages. A full queue makes [`publish`](EventPublisher::publish) wait
/// until the subscriber catches up, so a slow consumer never loses messages.
/// Suitable for single-process operation; a distributed deployment would use
/// a broker-backed implementation of [`EventPublisher`].
pub struct InMemoryEventBus {
    /// Subscriber queues; `None` while the channel is closed.
    slots: RwLock<Option<Vec<Slot>>>,

    /// Total messages accepted.
    events_published: AtomicU64,

    /// Per-subscriber queue capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create an open bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create an open bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let bus = Self::closed(capacity);
        bus.open();
        bus
    }

    /// Create a bus that rejects publishes until [`open`](Self::open) is called.
    #[must_use]
    pub fn closed(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(None),
            events_published: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Open the channel. No-op if already open.
    pub fn open(&self) {
        let mut slots = self.slots.write();
        if slots.is_none() {
            *slots = Some(Vec::new());
            info!(capacity = self.capacity, "Channel opened");
        }
    }

    /// Close the channel.
    ///
    /// Subscribers receive whatever is already queued and then see the end
    /// of the stream. Later publishes fail with [`PublishError::Closed`].
    pub fn close(&self) {
        if self.slots.write().take().is_some() {
            info!("Channel closed");
        }
    }

    /// Whether the channel currently accepts publishes.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.slots.read().is_some()
    }

    /// Subscribe to messages matching a filter.
    ///
    /// Only messages published after this call are delivered.
    pub fn subscribe(&self, filter: EventFilter) -> Result<Subscription, SubscriptionError> {
        let mut guard = self.slots.write();
        let Some(slots) = guard.as_mut() else {
            return Err(SubscriptionError::Closed);
        };

        slots.retain(|slot| !slot.sender.is_closed());
        let (sender, receiver) = mpsc::channel(self.capacity);
        slots.push(Slot {
            filter: filter.clone(),
            sender,
        });

        debug!(topics = ?filter.topics, "New subscription created");
        Ok(Subscription::new(receiver, filter))
    }

    /// Get the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slots.read().as_ref().map_or(0, |slots| {
            slots.iter().filter(|s| !s.sender.is_closed()).count()
        })
    }

    /// Get the per-subscriber queue capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, message: ChannelMessage) -> Result<usize, PublishError> {
        // Snapshot the matching queues; the lock is not held across `send`.
        let targets: Vec<mpsc::Sender<ChannelMessage>> = {
            let guard = self.slots.read();
            let Some(slots) = guard.as_ref() else {
                warn!(topic = %message.topic, "Publish rejected (channel closed)");
                return Err(PublishError::Closed);
            };
            slots
                .iter()
                .filter(|slot| !slot.sender.is_closed() && slot.filter.matches(&message))
                .map(|slot| slot.sender.clone())
                .collect()
        };

        self.events_published.fetch_add(1, Ordering::Relaxed);

        if targets.is_empty() {
            warn!(topic = %message.topic, "Message dropped (no receivers)");
            return Ok(0);
        }

        let mut delivered = 0;
        for sender in targets {
            if sender.capacity() == 0 {
                debug!(topic = %message.topic, "Subscriber queue full, waiting");
            }
            match sender.send(message.clone()).await {
                Ok(()) => delivered += 1,
                Err(_) => {
                    warn!(topic = %message.topic, "Subscriber gone before delivery");
                }
            }
        }

        debug!(topic = %message.topic, receivers = delivered, "Message published");
        Ok(delivered)
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
