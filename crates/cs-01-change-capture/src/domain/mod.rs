//! # Domain Layer
//!
//! Entity contract, write receipts and errors for the change capture
//! subsystem. No I/O lives here.

pub mod entity;
pub mod errors;

pub use entity::*;
pub use errors::*;
