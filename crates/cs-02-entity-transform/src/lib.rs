//! # Entity Transform Subsystem (cs-02)
//!
//! Pure, per-entity-type mappings from a system-of-record snapshot to
//! (a) the remote system's payload and (b) for supported types, a canonical
//! profile.
//!
//! ## Student Mapping
//!
//! ```text
//! Estudante (source)                Usuario (target)
//! ─────────────────                 ────────────────
//! nomeCompleto ── split ──┬──→ prenome
//!                         └──→ sobrenome
//!                  (const) ───→ situacaoMatricula = "ATIVO"
//!
//! Estudante (source)                StudentProfile (canonical)
//! ─────────────────                 ──────────────────────────
//! nomeCompleto ── split ──→ prenome, sobrenome, nomeCompleto
//! dataDeNascimento, matricula, statusBiblioteca  (default "")
//! statusAcademico                                (default "ATIVO")
//! ```
//!
//! ## Failure Contract
//!
//! Transformers never panic on bad input. A payload that does not match the
//! expected shape yields a [`TransformError`] and no partial output.

pub mod domain;
pub mod ports;
pub mod student;

pub use domain::{split_full_name, PersonName, TransformError, TransformOutput};
pub use ports::EntityTransformer;
pub use student::{StudentTransformer, STUDENT_ENTITY, TARGET_ENROLLMENT_STATUS};
