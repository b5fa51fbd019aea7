//! # Domain Layer
//!
//! Routing table, per-event outcomes and the pipeline error taxonomy.

pub mod errors;
pub mod outcome;
pub mod registry;

pub use errors::*;
pub use outcome::*;
pub use registry::*;
