//! # Integration Tests
//!
//! Cross-crate flows through the change channel.

pub mod e2e_sync;
pub mod flows;
