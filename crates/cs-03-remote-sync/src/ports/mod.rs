//! # Ports Layer
//!
//! - **Driven Ports (Outbound)**: `RemoteSyncClient`, the remote system's API.

pub mod outbound;

pub use outbound::*;
