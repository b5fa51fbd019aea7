//! Per-event results.

use cs_03_remote_sync::DispatchOutcome;
use cs_04_canonical_store::CanonicalizationReport;
use shared_types::{OperationKind, SourceSystem};

/// Why an event was deliberately not synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The route's eligibility predicate rejected the event.
    Ineligible {
        entity: String,
        operation: OperationKind,
        source: SourceSystem,
    },
}

/// Result of processing one event.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    Skipped(SkipReason),
    /// Remote call succeeded; the route is not canonicalized.
    Dispatched(DispatchOutcome),
    /// Remote call succeeded and the canonicalization step ran.
    Canonicalized(CanonicalizationReport),
}

impl ProcessOutcome {
    /// Short label for flow logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Dispatched(_) => "dispatched",
            Self::Canonicalized(_) => "canonicalized",
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}
