//! # Domain Layer
//!
//! Pure transform logic, no I/O.

pub mod errors;
pub mod names;
pub mod output;

pub use errors::*;
pub use names::*;
pub use output::*;
