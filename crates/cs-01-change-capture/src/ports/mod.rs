//! # Ports Layer
//!
//! - **Driven Ports (Outbound)**: `RecordStore`, implemented by storage adapters.
//!
//! The publishing port is `shared_bus::EventPublisher`.

pub mod outbound;

pub use outbound::*;
