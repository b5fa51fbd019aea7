//! Canonicalization result.

use crate::domain::PersistenceError;

/// What one canonicalization step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizationReport {
    /// Freshly assigned canonical id.
    pub canonical_id: String,
    /// Source-system id read from the event payload.
    pub source_system_id: Option<String>,
    /// Target-system id read from the remote response.
    pub target_system_id: Option<String>,
    pub student_written: bool,
    pub mapping_written: bool,
    /// Write failures, in the order they occurred.
    pub failures: Vec<PersistenceError>,
}

impl CanonicalizationReport {
    /// Both records were written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.student_written && self.mapping_written
    }
}
