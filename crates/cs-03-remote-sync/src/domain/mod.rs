//! # Domain Layer
//!
//! Request, outcome and error types for remote dispatch.

pub mod config;
pub mod errors;
pub mod request;

pub use config::*;
pub use errors::*;
pub use request::*;
