//! # Canonicalization Step
//!
//! After a successful remote create, assigns a canonical id to the student and
//! records the cross-system identity link.

use cs_03_remote_sync::DispatchOutcome;
use shared_types::{
    json_id, now_timestamp, CanonicalStudent, ChangeEvent, IdentityMapping, StudentProfile,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::CanonicalizationReport;
use crate::store::CanonicalStore;

/// Writes one canonical student and one identity mapping per call.
///
/// No dedup on the source id: a re-delivered event yields a second canonical
/// entity with a new canonical id.
#[derive(Clone)]
pub struct Canonicalizer {
    store: CanonicalStore,
}

impl Canonicalizer {
    pub fn new(store: CanonicalStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &CanonicalStore {
        &self.store
    }

    /// Link a dispatched source record to the remote record.
    ///
    /// Never fails as a whole; each write failure is logged and listed in
    /// the report.
    pub async fn canonicalize(
        &self,
        event: &ChangeEvent,
        profile: StudentProfile,
        outcome: &DispatchOutcome,
    ) -> CanonicalizationReport {
        let canonical_id = Uuid::new_v4().to_string();
        let source_system_id = source_id(&event.payload);
        let target_system_id = outcome.target_id.clone();

        let student = CanonicalStudent::new(canonical_id.clone(), profile);
        let mapping = IdentityMapping {
            canonical_id: canonical_id.clone(),
            source_system_id: source_system_id.clone(),
            target_system_id: target_system_id.clone(),
            last_updated: now_timestamp(),
        };

        let mut report = CanonicalizationReport {
            canonical_id,
            source_system_id,
            target_system_id,
            student_written: false,
            mapping_written: false,
            failures: Vec::new(),
        };

        match self.store.save_student(&student).await {
            Ok(_) => report.student_written = true,
            Err(e) => {
                warn!(canonical_id = %report.canonical_id, error = %e, "[cs-04] Canonical student not persisted");
                report.failures.push(e);
            }
        }

        match self.store.save_mapping(&mapping).await {
            Ok(_) => report.mapping_written = true,
            Err(e) => {
                warn!(canonical_id = %report.canonical_id, error = %e, "[cs-04] Identity mapping not persisted");
                report.failures.push(e);
            }
        }

        info!(
            canonical_id = %report.canonical_id,
            source_id = ?report.source_system_id,
            target_id = ?report.target_system_id,
            complete = report.is_complete(),
            "[cs-04] Student canonicalized"
        );

        report
    }
}

/// Source id from the event snapshot; `None` if absent or unparsable.
fn source_id(payload: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .as_ref()
        .and_then(json_id)
}
