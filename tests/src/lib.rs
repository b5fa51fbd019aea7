//! # Cross-Sync Test Suite
//!
//! Unified test crate for flows that span several crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared entities and test doubles
//! └── integration/      # Cross-crate flows
//!     ├── flows.rs      # Channel → listener → pipeline, with a recording remote
//!     └── e2e_sync.rs   # Full runtime against a mock HTTP server
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cs-tests
//! cargo test -p cs-tests integration::e2e_sync
//! ```

pub mod fixtures;
pub mod integration;
