//! # Sync Runtime Library
//!
//! Lifecycle of the sync pipeline. The `sync-runtime` binary is a thin
//! wrapper around [`SyncRuntime`]; the library is also used to embed the
//! pipeline in-process next to a system-of-record.
//!
//! ## Lifecycle
//!
//! ```text
//! new(config) ──→ start() ──→ [listener running] ──→ shutdown()
//!                   │                                   │
//!                   ├─ open channel                     ├─ signal listener
//!                   ├─ subscribe once (topic)           ├─ close channel
//!                   └─ spawn EventListener              └─ await listener task
//! ```

pub mod container;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use cs_01_change_capture::{Entity, RecordStore, Repository};
use cs_05_pipeline::{EventListener, ListenerStats};
use parking_lot::Mutex;
use shared_bus::EventFilter;
use shared_types::SourceSystem;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub use container::{ConfigError, SyncConfig, SyncContainer};

/// The running sync pipeline.
pub struct SyncRuntime {
    container: Arc<SyncContainer>,
    shutdown_tx: watch::Sender<bool>,
    listener: Mutex<Option<JoinHandle<ListenerStats>>>,
}

impl SyncRuntime {
    /// Validate `config` and build all components.
    pub fn new(config: SyncConfig) -> Result<Self> {
        config.validate().context("invalid sync configuration")?;
        Ok(Self::from_container(SyncContainer::new(config)?))
    }

    /// Wrap an already built container.
    pub fn from_container(container: SyncContainer) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            listener: Mutex::new(None),
        }
    }

    /// Open the channel, subscribe and spawn the listener.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> Result<()> {
        let mut listener = self.listener.lock();
        if listener.is_some() {
            bail!("sync runtime already started");
        }

        let bus = &self.container.event_bus;
        bus.open();

        let topic = self.container.config.channel.topic.clone();
        let subscription = bus
            .subscribe(EventFilter::topic(topic.clone()))
            .context("failed to subscribe to change channel")?;

        let task = EventListener::new(subscription, Arc::clone(&self.container.controller));
        *listener = Some(tokio::spawn(task.run(self.shutdown_tx.subscribe())));

        info!(topic = %topic, "[runtime] Sync runtime started");
        Ok(())
    }

    /// Stop the listener and close the channel.
    ///
    /// Returns the listener's counters, or `None` if it was never started.
    pub async fn shutdown(&self) -> Option<ListenerStats> {
        info!("[runtime] Initiating graceful shutdown...");

        self.shutdown_tx.send_replace(true);
        self.container.event_bus.close();

        let handle = self.listener.lock().take()?;
        match handle.await {
            Ok(stats) => {
                info!("[runtime] Shutdown complete");
                Some(stats)
            }
            Err(e) => {
                error!(error = %e, "[runtime] Listener task failed");
                None
            }
        }
    }

    /// Whether the listener is running.
    pub fn is_running(&self) -> bool {
        self.listener
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Change Event Source for an in-process ORM system-of-record.
    pub fn source_repository<E: Entity>(&self, store: Arc<dyn RecordStore>) -> Repository<E> {
        self.repository_for(store, SourceSystem::SourceA)
    }

    /// Change Event Source for an in-process system-of-record of any kind.
    pub fn repository_for<E: Entity>(
        &self,
        store: Arc<dyn RecordStore>,
        source: SourceSystem,
    ) -> Repository<E> {
        Repository::new(store, self.container.event_bus.clone(), source)
            .with_topic(self.container.config.channel.topic.clone())
    }

    pub fn container(&self) -> Arc<SyncContainer> {
        Arc::clone(&self.container)
    }
}
