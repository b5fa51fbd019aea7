//! Shared entities and test doubles.

use std::sync::Arc;

use async_trait::async_trait;
use cs_01_change_capture::{Entity, InMemoryRecordStore, Repository};
use cs_03_remote_sync::{
    DispatchError, DispatchOutcome, DispatchRequest, RemoteSyncClient,
};
use cs_04_canonical_store::{CanonicalStore, Canonicalizer};
use cs_05_pipeline::{EntityRegistry, EventListener, ListenerStats, PipelineController};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_bus::{EventFilter, InMemoryEventBus};
use shared_types::{SourceSystem, DEFAULT_TOPIC};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Student as stored by the academic registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estudante {
    pub id: String,
    #[serde(rename = "nomeCompleto")]
    pub nome_completo: String,
    #[serde(rename = "dataDeNascimento", skip_serializing_if = "Option::is_none")]
    pub data_de_nascimento: Option<String>,
}

impl Estudante {
    pub fn new(id: &str, nome_completo: &str) -> Self {
        Self {
            id: id.to_string(),
            nome_completo: nome_completo.to_string(),
            data_de_nascimento: None,
        }
    }

    pub fn born(mut self, date: &str) -> Self {
        self.data_de_nascimento = Some(date.to_string());
        self
    }
}

impl Entity for Estudante {
    const ENTITY_TYPE: &'static str = "Estudante";

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// An entity type with no registered route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professor {
    pub id: String,
    pub nome: String,
}

impl Entity for Professor {
    const ENTITY_TYPE: &'static str = "Professor";

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Remote double: records every request and answers from a fixed script.
pub struct RecordingRemote {
    requests: Mutex<Vec<DispatchRequest>>,
    response: Result<Value, DispatchError>,
}

impl RecordingRemote {
    pub fn answering(body: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Ok(body),
        })
    }

    pub fn failing(error: DispatchError) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Err(error),
        })
    }

    pub fn requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RemoteSyncClient for RecordingRemote {
    async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        self.requests.lock().push(request);
        self.response
            .clone()
            .map(|body| DispatchOutcome::from_response(201, body))
    }
}

/// In-process pipeline wired to one channel, with a running listener.
pub struct Harness {
    pub bus: Arc<InMemoryEventBus>,
    pub canonical: CanonicalStore,
    pub remote: Arc<RecordingRemote>,
    listener: JoinHandle<ListenerStats>,
    _shutdown: watch::Sender<bool>,
}

impl Harness {
    pub fn start(remote: Arc<RecordingRemote>) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let canonical = CanonicalStore::new(Arc::new(InMemoryRecordStore::new()), bus.clone());
        let controller = Arc::new(PipelineController::new(
            EntityRegistry::with_defaults(),
            remote.clone(),
            Canonicalizer::new(canonical.clone()),
        ));

        let subscription = bus
            .subscribe(EventFilter::topic(DEFAULT_TOPIC))
            .expect("channel is open");
        let (shutdown, rx) = watch::channel(false);
        let listener = tokio::spawn(EventListener::new(subscription, controller).run(rx));

        Self {
            bus,
            canonical,
            remote,
            listener,
            _shutdown: shutdown,
        }
    }

    /// Change Event Source over a fresh system-of-record.
    pub fn repository<E: Entity>(&self, source: SourceSystem) -> Repository<E> {
        Repository::new(Arc::new(InMemoryRecordStore::new()), self.bus.clone(), source)
    }

    /// Close the channel and wait until every buffered event is processed.
    ///
    /// Call at most once.
    pub async fn drain(&mut self) -> ListenerStats {
        self.bus.close();
        (&mut self.listener).await.expect("listener task")
    }
}
