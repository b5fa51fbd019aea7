//! # Canonical Store Subsystem (cs-04)
//!
//! Holds the system-independent view of each student and the identity map
//! correlating its canonical id with the per-system ids.
//!
//! ## Canonicalization
//!
//! ```text
//! successful Student dispatch
//!        │
//!        ├─→ canonical id = fresh UUID v4
//!        ├─→ write CanonicalStudent:<id>   (Emit::Suppress)
//!        └─→ write IdentityMapping:<id>    (Emit::Suppress)
//! ```
//!
//! The two writes are independent. A failed write is logged and reported; it
//! does not undo the sibling write or the remote call.
//!
//! Every write here is suppressed: canonical records never reach the change
//! channel, otherwise the pipeline would consume its own output.

pub mod canonicalizer;
pub mod domain;
pub mod store;

pub use canonicalizer::Canonicalizer;
pub use domain::{CanonicalizationReport, MappingRecord, PersistenceError, StudentRecord};
pub use store::CanonicalStore;
