//! # Core Domain Entities
//!
//! Canonical entity model and identity-map rows shared by the transformer,
//! the canonical store and the pipeline.

use serde::{Deserialize, Serialize};

/// Whether a repository write publishes a change event.
///
/// Writes performed as a consequence of consuming an event MUST use
/// [`Emit::Suppress`]; otherwise they re-enter the channel and loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    #[default]
    Publish,
    Suppress,
}

impl Emit {
    /// True when the write should be published.
    #[must_use]
    pub fn is_publish(self) -> bool {
        matches!(self, Self::Publish)
    }
}

/// Default academic status when the source record has none.
pub const DEFAULT_ACADEMIC_STATUS: &str = "ATIVO";

/// Normalized student fields produced by the transformer.
///
/// A profile has no identity of its own; it becomes a [`CanonicalStudent`]
/// only when the canonicalization step assigns a canonical id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(rename = "prenome")]
    pub given_name: String,
    #[serde(rename = "sobrenome")]
    pub family_name: String,
    #[serde(rename = "nomeCompleto")]
    pub full_name: String,
    #[serde(rename = "dataDeNascimento")]
    pub birth_date: String,
    #[serde(rename = "matricula")]
    pub enrollment_code: String,
    #[serde(rename = "statusAcademico")]
    pub academic_status: String,
    #[serde(rename = "statusBiblioteca")]
    pub library_status: String,
}

/// System-independent representation of a student.
///
/// `canonical_id` is assigned once, at the first successful cross-system link,
/// and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalStudent {
    #[serde(rename = "idCanonico")]
    canonical_id: String,
    #[serde(flatten)]
    pub profile: StudentProfile,
}

impl CanonicalStudent {
    pub fn new(canonical_id: impl Into<String>, profile: StudentProfile) -> Self {
        Self {
            canonical_id: canonical_id.into(),
            profile,
        }
    }

    pub fn canonical_id(&self) -> &str {
        &self.canonical_id
    }
}

/// Correlation of a canonical id with its per-system identifiers.
///
/// At most one row exists per `canonical_id`. Uniqueness of the source and
/// target ids across rows is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMapping {
    #[serde(rename = "idCanonico")]
    pub canonical_id: String,
    #[serde(rename = "idSGA")]
    pub source_system_id: Option<String>,
    #[serde(rename = "idSB")]
    pub target_system_id: Option<String>,
    #[serde(rename = "ultimaAtualizacao")]
    pub last_updated: String,
}

/// Read an `"id"` field from a JSON object as a string.
///
/// Numbers are rendered in decimal; missing, `null` or other shapes yield `None`.
#[must_use]
pub fn json_id(value: &serde_json::Value) -> Option<String> {
    match value.get("id")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
