//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: `EntityTransformer`, called by the pipeline.

pub mod inbound;

pub use inbound::*;
