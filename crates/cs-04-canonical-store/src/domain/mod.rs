//! # Domain Layer

pub mod errors;
pub mod records;
pub mod report;

pub use errors::*;
pub use records::*;
pub use report::*;
