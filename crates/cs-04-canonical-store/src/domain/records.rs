//! Stored forms of the canonical entities.
//!
//! Thin wrappers that give the shared types a record key and a collection
//! prefix in the record store. The JSON shape is that of the wrapped type.

use cs_01_change_capture::Entity;
use serde::{Deserialize, Serialize};
use shared_types::{CanonicalStudent, IdentityMapping};

/// A [`CanonicalStudent`] keyed by canonical id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentRecord(pub CanonicalStudent);

impl Entity for StudentRecord {
    const ENTITY_TYPE: &'static str = "CanonicalStudent";

    fn key(&self) -> String {
        self.0.canonical_id().to_string()
    }
}

/// An [`IdentityMapping`] keyed by canonical id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingRecord(pub IdentityMapping);

impl Entity for MappingRecord {
    const ENTITY_TYPE: &'static str = "IdentityMapping";

    fn key(&self) -> String {
        self.0.canonical_id.clone()
    }
}
