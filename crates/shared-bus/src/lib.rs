//! # Shared Bus - Message Channel for Change Events
//!
//! A publish/subscribe channel carrying serialized change events on a fixed
//! topic. Every subscriber gets its own bounded queue; publishers wait when a
//! queue is full, so nothing is dropped while the channel is open.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────────┐
//! │ Change Event     │                    │ Event Listener   │
//! │ Source           │    publish()       │                  │
//! │                  │ ──────┐            │                  │
//! └──────────────────┘       │            └──────────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! ## Lifecycle
//!
//! The bus is a long-lived handle owned by the runtime: opened at startup,
//! closed at shutdown. Publishing to a closed bus fails with
//! [`PublishError::Closed`]; open subscriptions drain and then end.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{ChannelMessage, EventFilter};
pub use publisher::{EventPublisher, InMemoryEventBus, PublishError};
pub use subscriber::{Subscription, SubscriptionError};

/// Messages buffered per subscriber before publishers wait.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
