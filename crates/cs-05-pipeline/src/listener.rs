//! # Event Listener
//!
//! Owns the process's single subscription to the change channel and feeds
//! each message, in order, to the [`PipelineController`].

use std::sync::Arc;

use shared_bus::Subscription;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::controller::PipelineController;
use crate::domain::{PipelineError, ProcessOutcome};

/// Counters returned when the listener stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub received: u64,
    pub synchronized: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl ListenerStats {
    fn record(&mut self, result: &Result<ProcessOutcome, PipelineError>) {
        self.received += 1;
        match result {
            Ok(ProcessOutcome::Skipped(_)) => self.skipped += 1,
            Ok(_) => self.synchronized += 1,
            Err(_) => self.failed += 1,
        }
    }
}

pub struct EventListener {
    subscription: Subscription,
    controller: Arc<PipelineController>,
}

impl EventListener {
    pub fn new(subscription: Subscription, controller: Arc<PipelineController>) -> Self {
        Self {
            subscription,
            controller,
        }
    }

    /// Run until the channel closes or `shutdown` turns true.
    ///
    /// Each event is processed to completion before the next receive. A
    /// shutdown signal does not interrupt an event already in progress.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> ListenerStats {
        info!("[cs-05] Event listener started");
        let mut stats = ListenerStats::default();

        loop {
            if *shutdown.borrow() {
                info!("[cs-05] Shutdown signal received");
                break;
            }

            let message = tokio::select! {
                message = self.subscription.recv() => message,
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        info!("[cs-05] Shutdown sender dropped, exiting");
                        break;
                    }
                    continue;
                }
            };

            let Some(message) = message else {
                info!("[cs-05] Channel closed, exiting");
                break;
            };

            let result = self.controller.process_raw(&message.body).await;
            if let Err(e) = &result {
                warn!(error = %e, "[cs-05] Event dropped");
            }
            stats.record(&result);
        }

        info!(
            received = stats.received,
            synchronized = stats.synchronized,
            skipped = stats.skipped,
            failed = stats.failed,
            "[cs-05] Event listener stopped"
        );
        stats
    }
}
