//! # Student Transformer
//!
//! Maps an `Estudante` snapshot from the academic registry to the remote
//! `Usuario` payload and to a canonical [`StudentProfile`].

use serde_json::{json, Map, Value};
use shared_types::{StudentProfile, DEFAULT_ACADEMIC_STATUS};
use tracing::debug;

use crate::domain::{split_full_name, TransformError, TransformOutput};
use crate::ports::EntityTransformer;

/// Entity type tag of students in the source system.
pub const STUDENT_ENTITY: &str = "Estudante";

/// Enrollment status sent to the remote system for every new student.
pub const TARGET_ENROLLMENT_STATUS: &str = "ATIVO";

/// Transformer for `Estudante` snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentTransformer;

impl StudentTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Build the canonical profile from a parsed snapshot.
    pub fn profile(&self, record: &Map<String, Value>) -> Result<StudentProfile, TransformError> {
        let full_name = text_field(record, "nomeCompleto")?.unwrap_or_default();
        let name = split_full_name(&full_name);

        Ok(StudentProfile {
            given_name: name.given,
            family_name: name.family,
            full_name,
            birth_date: text_field(record, "dataDeNascimento")?.unwrap_or_default(),
            enrollment_code: text_field(record, "matricula")?.unwrap_or_default(),
            academic_status: text_field(record, "statusAcademico")?
                .unwrap_or_else(|| DEFAULT_ACADEMIC_STATUS.to_string()),
            library_status: text_field(record, "statusBiblioteca")?.unwrap_or_default(),
        })
    }

    fn parse(payload: &str) -> Result<Map<String, Value>, TransformError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| TransformError::InvalidJson {
                message: e.to_string(),
            })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(TransformError::NotAnObject {
                entity: STUDENT_ENTITY.to_string(),
            }),
        }
    }
}

impl EntityTransformer for StudentTransformer {
    fn entity_type(&self) -> &str {
        STUDENT_ENTITY
    }

    fn transform(&self, payload: &str) -> Result<TransformOutput, TransformError> {
        let record = Self::parse(payload)?;
        let profile = self.profile(&record)?;

        let target_payload = json!({
            "sobrenome": profile.family_name,
            "prenome": profile.given_name,
            "situacaoMatricula": TARGET_ENROLLMENT_STATUS,
        });

        debug!(
            prenome = %profile.given_name,
            sobrenome = %profile.family_name,
            "[cs-02] Student transformed"
        );

        Ok(TransformOutput {
            target_payload,
            canonical: Some(profile),
        })
    }
}

/// Optional scalar field read as text. `null` counts as absent; numbers and
/// booleans are rendered as their JSON text.
fn text_field(
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, TransformError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(TransformError::FieldType {
            field,
            expected: "string, number or boolean",
        }),
    }
}
