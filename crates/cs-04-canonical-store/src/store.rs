//! # Canonical Store
//!
//! Two repositories over one record store: canonical students and identity
//! mappings. Every write is suppressed.

use std::sync::Arc;

use cs_01_change_capture::{RecordStore, Repository, WriteReceipt};
use shared_bus::EventPublisher;
use shared_types::{CanonicalStudent, Emit, IdentityMapping, SourceSystem};
use tracing::debug;

use crate::domain::{MappingRecord, PersistenceError, StudentRecord};

/// Canonical entity store plus identity map.
#[derive(Clone)]
pub struct CanonicalStore {
    students: Repository<StudentRecord>,
    mappings: Repository<MappingRecord>,
}

impl CanonicalStore {
    /// Bind both collections to `store`.
    ///
    /// The publisher is only held to satisfy the repository contract; nothing
    /// written through this store is ever published.
    pub fn new(store: Arc<dyn RecordStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        let students = Repository::new(store.clone(), publisher.clone(), SourceSystem::SourceA)
            .with_default_emit(Emit::Suppress);
        let mappings = Repository::new(store, publisher, SourceSystem::SourceA)
            .with_default_emit(Emit::Suppress);
        Self { students, mappings }
    }

    /// Insert a canonical student.
    pub async fn save_student(
        &self,
        student: &CanonicalStudent,
    ) -> Result<WriteReceipt, PersistenceError> {
        let receipt = self
            .students
            .create(&StudentRecord(student.clone()), Emit::Suppress)
            .await
            .map_err(|source| PersistenceError::Student {
                canonical_id: student.canonical_id().to_string(),
                source,
            })?;
        debug!(canonical_id = %student.canonical_id(), "[cs-04] Canonical student stored");
        Ok(receipt)
    }

    /// Insert an identity-map row.
    pub async fn save_mapping(
        &self,
        mapping: &IdentityMapping,
    ) -> Result<WriteReceipt, PersistenceError> {
        let receipt = self
            .mappings
            .create(&MappingRecord(mapping.clone()), Emit::Suppress)
            .await
            .map_err(|source| PersistenceError::Mapping {
                canonical_id: mapping.canonical_id.clone(),
                source,
            })?;
        debug!(canonical_id = %mapping.canonical_id, "[cs-04] Identity mapping stored");
        Ok(receipt)
    }

    pub fn student(&self, canonical_id: &str) -> Result<Option<CanonicalStudent>, PersistenceError> {
        Ok(self.students.load(canonical_id)?.map(|r| r.0))
    }

    pub fn mapping(&self, canonical_id: &str) -> Result<Option<IdentityMapping>, PersistenceError> {
        Ok(self.mappings.load(canonical_id)?.map(|r| r.0))
    }

    /// All canonical students, ordered by canonical id.
    pub fn students(&self) -> Result<Vec<CanonicalStudent>, PersistenceError> {
        Ok(self.students.load_all()?.into_iter().map(|r| r.0).collect())
    }

    /// All identity-map rows, ordered by canonical id.
    pub fn mappings(&self) -> Result<Vec<IdentityMapping>, PersistenceError> {
        Ok(self.mappings.load_all()?.into_iter().map(|r| r.0).collect())
    }
}
