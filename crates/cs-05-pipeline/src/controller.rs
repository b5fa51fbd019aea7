//! # Pipeline Controller
//!
//! Runs one change event through decode, eligibility, transform, remote
//! dispatch and canonicalization.

use std::sync::Arc;
use std::time::Instant;

use cs_02_entity_transform::TransformError;
use cs_03_remote_sync::{DispatchRequest, HttpVerb, RemoteSyncClient};
use cs_04_canonical_store::Canonicalizer;
use shared_types::ChangeEvent;
use tracing::{debug, info, warn};

use crate::domain::{EntityRegistry, PipelineError, ProcessOutcome, SkipReason};

/// Per-event orchestrator. Holds no per-event state.
pub struct PipelineController {
    registry: EntityRegistry,
    remote: Arc<dyn RemoteSyncClient>,
    canonicalizer: Canonicalizer,
}

impl PipelineController {
    pub fn new(
        registry: EntityRegistry,
        remote: Arc<dyn RemoteSyncClient>,
        canonicalizer: Canonicalizer,
    ) -> Self {
        Self {
            registry,
            remote,
            canonicalizer,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    #[must_use]
    pub fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    /// Process one raw channel message body.
    ///
    /// Emits one `EVENT_FLOW_JSON` line whatever the result.
    pub async fn process_raw(&self, raw: &str) -> Result<ProcessOutcome, PipelineError> {
        let started = Instant::now();

        let event = match ChangeEvent::decode(raw) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "[cs-05] Dropping malformed change event");
                let err = PipelineError::from(e);
                log_flow(None, err.kind(), started);
                return Err(err);
            }
        };

        let result = self.process(&event).await;
        let label = match &result {
            Ok(outcome) => outcome.kind(),
            Err(e) => e.kind(),
        };
        log_flow(Some(&event), label, started);
        result
    }

    /// Process an already decoded event.
    pub async fn process(&self, event: &ChangeEvent) -> Result<ProcessOutcome, PipelineError> {
        if !self.registry.is_eligible(event) {
            info!(
                entity = %event.entity_type,
                operation = %event.operation,
                source = %event.source,
                "[cs-05] Event not eligible for sync, skipping"
            );
            return Ok(ProcessOutcome::Skipped(SkipReason::Ineligible {
                entity: event.entity_type.clone(),
                operation: event.operation,
                source: event.source,
            }));
        }

        let verb = HttpVerb::from_operation(event.operation);
        let destination = self.registry.destination(&event.entity_type);

        let Some(route) = self.registry.route(&event.entity_type) else {
            warn!(entity = %event.entity_type, destination = %destination, "[cs-05] No transformer for entity type");
            return Err(TransformError::UnsupportedEntity {
                entity: event.entity_type.clone(),
            }
            .into());
        };

        let output = route.transformer().transform(&event.payload).map_err(|e| {
            warn!(entity = %event.entity_type, error = %e, "[cs-05] Transform failed, event dropped");
            PipelineError::from(e)
        })?;

        debug!(verb = %verb, destination = %destination, "[cs-05] Dispatching transformed payload");
        let outcome = self
            .remote
            .dispatch(DispatchRequest::new(verb, destination, output.target_payload))
            .await?;

        match output.canonical {
            Some(profile) if route.canonicalize() => {
                let report = self
                    .canonicalizer
                    .canonicalize(event, profile, &outcome)
                    .await;
                Ok(ProcessOutcome::Canonicalized(report))
            }
            _ => Ok(ProcessOutcome::Dispatched(outcome)),
        }
    }
}

fn log_flow(event: Option<&ChangeEvent>, outcome: &str, started: Instant) {
    info!(
        "EVENT_FLOW_JSON {}",
        serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "subsystem_id": "cs-05",
            "event_type": "ChangeEventProcessed",
            "entity": event.map(|e| e.entity_type.as_str()),
            "operation": event.map(|e| e.operation.as_str()),
            "source": event.map(|e| e.source.as_str()),
            "outcome": outcome,
            "processing_time_ms": started.elapsed().as_millis() as u64,
        })
    );
}
