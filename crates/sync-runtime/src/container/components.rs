//! # Component Container
//!
//! Builds every long-lived component once, in dependency order:
//!
//! ```text
//! 1. Channel          InMemoryEventBus (created closed)
//! 2. Canonical store  file-backed or in-memory RecordStore
//! 3. Remote client    HttpRemoteSyncClient
//! 4. Pipeline         EntityRegistry + Canonicalizer + PipelineController
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use cs_01_change_capture::{FileBackedRecordStore, InMemoryRecordStore, RecordStore};
use cs_03_remote_sync::{HttpRemoteSyncClient, RemoteSyncClient};
use cs_04_canonical_store::{CanonicalStore, Canonicalizer};
use cs_05_pipeline::{EntityRegistry, PipelineController};
use shared_bus::InMemoryEventBus;
use tracing::info;

use crate::container::config::SyncConfig;

/// All runtime components, shared by handle.
pub struct SyncContainer {
    /// Change channel. Opened by the runtime at start.
    pub event_bus: Arc<InMemoryEventBus>,

    /// Canonical students and identity mappings.
    pub canonical_store: CanonicalStore,

    /// Per-event orchestrator driven by the listener.
    pub controller: Arc<PipelineController>,

    /// Configuration (immutable after initialization).
    pub config: SyncConfig,
}

impl SyncContainer {
    /// Build all components with the HTTP remote client.
    pub fn new(config: SyncConfig) -> Result<Self> {
        let remote = HttpRemoteSyncClient::new(config.remote.client_config())
            .context("failed to build remote sync client")?;
        Self::with_remote(config, Arc::new(remote))
    }

    /// Build all components around a given remote client.
    pub fn with_remote(config: SyncConfig, remote: Arc<dyn RemoteSyncClient>) -> Result<Self> {
        info!("[runtime] Initializing sync container");

        let event_bus = Arc::new(InMemoryEventBus::closed(config.channel.capacity));

        let records: Arc<dyn RecordStore> = if config.storage.in_memory {
            info!("[runtime] Canonical store: in-memory");
            Arc::new(InMemoryRecordStore::new())
        } else {
            let path = &config.storage.canonical_store_path;
            info!(path = %path.display(), "[runtime] Canonical store: file-backed");
            Arc::new(FileBackedRecordStore::open(path).with_context(|| {
                format!("failed to open canonical store at {}", path.display())
            })?)
        };

        let canonical_store = CanonicalStore::new(records, event_bus.clone());
        let controller = Arc::new(PipelineController::new(
            EntityRegistry::with_defaults(),
            remote,
            Canonicalizer::new(canonical_store.clone()),
        ));

        info!(
            remote = %config.remote.base_url,
            topic = %config.channel.topic,
            "[runtime] Sync container ready"
        );

        Ok(Self {
            event_bus,
            canonical_store,
            controller,
            config,
        })
    }
}
