//! # Change Capture Subsystem (cs-01)
//!
//! The Change Event Source: a generic repository that wraps an opaque record
//! store and, after every successful local write, publishes a
//! [`ChangeEvent`](shared_types::ChangeEvent) on the message channel.
//!
//! ## Write Path
//!
//! ```text
//! create/update/delete ──→ [RecordStore write] ──ok──→ emit? ──yes──→ [Event Bus]
//!                                  │                      │
//!                                  └─err──→ return        └─no──→ done (suppressed)
//! ```
//!
//! ## Guarantees
//!
//! | Property | Behavior |
//! |----------|----------|
//! | No event for failed write | Store error returns before publication |
//! | Publication failure | Logged; committed write is NOT rolled back |
//! | Delivery | At-most-once: a channel outage silently drops the event |
//! | Loop prevention | Per-call [`Emit::Suppress`](shared_types::Emit) |
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): `Entity` trait, receipts, errors
//! - **Ports Layer** (`ports/`): `RecordStore` outbound SPI
//! - **Adapters Layer** (`adapters/`): in-memory and file-backed stores
//! - **Service** (`service.rs`): the `Repository` itself

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::storage::InMemoryRecordStore;
#[cfg(feature = "file-store")]
pub use adapters::storage::FileBackedRecordStore;
pub use domain::{CaptureError, Entity, StoreError, WriteReceipt};
pub use ports::RecordStore;
pub use service::Repository;
