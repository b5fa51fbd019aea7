//! # Sync Pipeline Subsystem (cs-05)
//!
//! Consumes change events from the channel and drives each one through the
//! synchronization steps.
//!
//! ## Per-Event Flow
//!
//! ```text
//! EventListener ──raw body──→ PipelineController::process_raw
//!                                   │
//!     1. decode ───────────────────┤  invalid → PipelineError::Decode
//!     2. eligibility (route) ──────┤  no → Skipped(Ineligible)
//!     3. verb + destination        │
//!     4. transform ────────────────┤  error → PipelineError::Transform
//!     5. remote dispatch ──────────┤  error → PipelineError::Dispatch
//!     6. canonicalize? ────────────┘  yes → Canonicalized(report)
//!                                     no  → Dispatched(outcome)
//! ```
//!
//! Events are handled strictly one at a time. No error stops the listener.

pub mod controller;
pub mod domain;
pub mod listener;

pub use controller::PipelineController;
pub use domain::{
    create_from_source_a, default_destination, EntityRegistry, EntityRoute, Eligibility,
    PipelineError, ProcessOutcome, SkipReason, STUDENT_DESTINATION,
};
pub use listener::{EventListener, ListenerStats};
