//! # Repository Service
//!
//! Generic create/update/delete/load wrapper around a [`RecordStore`] that
//! publishes a change event after each successful write.

use std::marker::PhantomData;
use std::sync::Arc;

use shared_bus::{ChannelMessage, EventPublisher};
use shared_types::{ChangeEvent, Emit, OperationKind, SourceSystem, DEFAULT_TOPIC};
use tracing::{debug, warn};

use crate::domain::{CaptureError, Entity, StoreError, WriteReceipt};
use crate::ports::RecordStore;

/// Change Event Source for one entity type.
///
/// Cloning is cheap and clones share the same store and channel. There is no
/// mutable emission state: each write takes an explicit [`Emit`], and the
/// `*_default` helpers use the default fixed at construction.
pub struct Repository<E: Entity> {
    store: Arc<dyn RecordStore>,
    publisher: Arc<dyn EventPublisher>,
    source: SourceSystem,
    topic: String,
    default_emit: Emit,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            publisher: Arc::clone(&self.publisher),
            source: self.source,
            topic: self.topic.clone(),
            default_emit: self.default_emit,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    /// Create a repository publishing on the default topic.
    pub fn new(
        store: Arc<dyn RecordStore>,
        publisher: Arc<dyn EventPublisher>,
        source: SourceSystem,
    ) -> Self {
        Self {
            store,
            publisher,
            source,
            topic: DEFAULT_TOPIC.to_string(),
            default_emit: Emit::Publish,
            _entity: PhantomData,
        }
    }

    /// Publish on `topic` instead of the default topic.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Set the emission used by the `*_default` helpers.
    #[must_use]
    pub fn with_default_emit(mut self, emit: Emit) -> Self {
        self.default_emit = emit;
        self
    }

    pub fn source(&self) -> SourceSystem {
        self.source
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn default_emit(&self) -> Emit {
        self.default_emit
    }

    fn record_key(id: &str) -> Vec<u8> {
        format!("{}:{}", E::ENTITY_TYPE, id).into_bytes()
    }

    fn prefix() -> Vec<u8> {
        format!("{}:", E::ENTITY_TYPE).into_bytes()
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Insert a new record. Fails if the key already exists.
    pub async fn create(&self, entity: &E, emit: Emit) -> Result<WriteReceipt, CaptureError> {
        let id = entity.key();
        let key = Self::record_key(&id);
        let snapshot = serde_json::to_string(entity)?;

        if !self.store.insert_if_absent(&key, snapshot.as_bytes())? {
            return Err(StoreError::AlreadyExists { key: id }.into());
        }

        Ok(self
            .after_write(OperationKind::Create, id, snapshot, emit)
            .await)
    }

    /// Overwrite an existing record. Fails if the key is absent.
    pub async fn update(&self, entity: &E, emit: Emit) -> Result<WriteReceipt, CaptureError> {
        let id = entity.key();
        let key = Self::record_key(&id);
        let snapshot = serde_json::to_string(entity)?;

        if !self.store.exists(&key)? {
            return Err(StoreError::NotFound { key: id }.into());
        }
        self.store.put(&key, snapshot.as_bytes())?;

        Ok(self
            .after_write(OperationKind::Update, id, snapshot, emit)
            .await)
    }

    /// Remove a record. Fails if the key is absent.
    ///
    /// The published snapshot is the entity as passed by the caller.
    pub async fn delete(&self, entity: &E, emit: Emit) -> Result<WriteReceipt, CaptureError> {
        let id = entity.key();
        let snapshot = serde_json::to_string(entity)?;

        if !self.store.delete(&Self::record_key(&id))? {
            return Err(StoreError::NotFound { key: id }.into());
        }

        Ok(self
            .after_write(OperationKind::Delete, id, snapshot, emit)
            .await)
    }

    pub async fn create_default(&self, entity: &E) -> Result<WriteReceipt, CaptureError> {
        self.create(entity, self.default_emit).await
    }

    pub async fn update_default(&self, entity: &E) -> Result<WriteReceipt, CaptureError> {
        self.update(entity, self.default_emit).await
    }

    pub async fn delete_default(&self, entity: &E) -> Result<WriteReceipt, CaptureError> {
        self.delete(entity, self.default_emit).await
    }

    /// Build and publish the change event for a committed write.
    ///
    /// Never fails: the write is already durable, so a channel error is
    /// logged and reported as `published: false`.
    async fn after_write(
        &self,
        operation: OperationKind,
        key: String,
        snapshot: String,
        emit: Emit,
    ) -> WriteReceipt {
        let mut receipt = WriteReceipt {
            operation,
            key,
            published: false,
            receivers: 0,
        };

        if !emit.is_publish() {
            debug!(
                entity = E::ENTITY_TYPE,
                key = %receipt.key,
                operation = %operation,
                "[cs-01] Write committed, emission suppressed"
            );
            return receipt;
        }

        let event = ChangeEvent::new(E::ENTITY_TYPE, operation, self.source, snapshot);
        let message = match ChannelMessage::from_event(self.topic.clone(), &event) {
            Ok(m) => m,
            Err(e) => {
                warn!(entity = E::ENTITY_TYPE, key = %receipt.key, error = %e, "[cs-01] Could not encode change event");
                return receipt;
            }
        };

        match self.publisher.publish(message).await {
            Ok(receivers) => {
                debug!(
                    entity = E::ENTITY_TYPE,
                    key = %receipt.key,
                    operation = %operation,
                    receivers,
                    "[cs-01] Change event published"
                );
                receipt.published = true;
                receipt.receivers = receivers;
            }
            Err(e) => {
                warn!(
                    entity = E::ENTITY_TYPE,
                    key = %receipt.key,
                    operation = %operation,
                    error = %e,
                    "[cs-01] Change event dropped; write stays committed"
                );
            }
        }
        receipt
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Load one record by key.
    pub fn load(&self, id: &str) -> Result<Option<E>, CaptureError> {
        match self.store.get(&Self::record_key(id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Load every record of this entity type, ordered by key.
    pub fn load_all(&self) -> Result<Vec<E>, CaptureError> {
        self.store
            .prefix_scan(&Self::prefix())?
            .into_iter()
            .map(|(_, bytes)| serde_json::from_slice(&bytes).map_err(CaptureError::from))
            .collect()
    }
}
