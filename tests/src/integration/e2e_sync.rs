//! # End-to-End Sync Tests
//!
//! The full [`SyncRuntime`](sync_runtime::SyncRuntime) against a mock HTTP
//! server standing in for the remote system:
//!
//! ```text
//! Repository<Estudante>::create
//!        │  (ORM, CREATE)
//!        ▼
//! [crud-channel] ──→ EventListener ──→ PipelineController
//!                                          │
//!                  POST /usuarios ←────────┤
//!                  {"id":"u-1"}  ─────────→│
//!                                          ▼
//!                         CanonicalStudent + IdentityMapping (file store)
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use cs_01_change_capture::{FileBackedRecordStore, InMemoryRecordStore};
    use cs_04_canonical_store::CanonicalStore;
    use shared_bus::{EventPublisher, InMemoryEventBus};
    use shared_types::Emit;
    use sync_runtime::{SyncConfig, SyncRuntime};

    use crate::fixtures::Estudante;

    /// Poll `check` until it holds or two seconds pass.
    async fn eventually(check: impl Fn() -> bool) -> bool {
        for _ in 0..200 {
            if check() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        check()
    }

    fn config(base_url: String) -> SyncConfig {
        let mut config = SyncConfig::default();
        config.remote.base_url = base_url;
        config.remote.timeout_secs = 5;
        config.storage.in_memory = true;
        config
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_student_created_in_registry_is_linked_to_remote_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usuarios"))
            .and(body_json(json!({
                "sobrenome": "Clara Souza",
                "prenome": "Maria",
                "situacaoMatricula": "ATIVO"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "u-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let store_path = dir.path().join("integrador.db");
        let mut cfg = config(server.uri());
        cfg.storage.in_memory = false;
        cfg.storage.canonical_store_path = store_path.clone();

        let runtime = SyncRuntime::new(cfg).unwrap();
        runtime.start().unwrap();

        let registry = runtime.source_repository::<Estudante>(Arc::new(InMemoryRecordStore::new()));
        let receipt = registry
            .create(
                &Estudante::new("42", "Maria Clara Souza").born("1999-05-02"),
                Emit::Publish,
            )
            .await
            .unwrap();
        assert!(receipt.published);

        let canonical = runtime.container().canonical_store.clone();
        assert!(eventually(|| canonical.mappings().map(|m| m.len() == 1).unwrap_or(false)).await);

        let mapping = canonical.mappings().unwrap().remove(0);
        assert_eq!(mapping.source_system_id.as_deref(), Some("42"));
        assert_eq!(mapping.target_system_id.as_deref(), Some("u-1"));

        let student = canonical.student(&mapping.canonical_id).unwrap().unwrap();
        assert_eq!(student.profile.given_name, "Maria");
        assert_eq!(student.profile.family_name, "Clara Souza");
        assert_eq!(student.profile.full_name, "Maria Clara Souza");
        assert_eq!(student.profile.academic_status, "ATIVO");

        let stats = runtime.shutdown().await.unwrap();
        assert_eq!(stats.synchronized, 1);
        drop(canonical);
        drop(runtime);

        // Canonical records survive a restart.
        let reopened = CanonicalStore::new(
            Arc::new(FileBackedRecordStore::open(&store_path).unwrap()),
            Arc::new(InMemoryEventBus::new()),
        );
        assert_eq!(reopened.mappings().unwrap(), vec![mapping]);
        assert_eq!(reopened.students().unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_remote_outage_drops_events_without_canonical_records() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usuarios"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let runtime = SyncRuntime::new(config(server.uri())).unwrap();
        runtime.start().unwrap();

        let registry = runtime.source_repository::<Estudante>(Arc::new(InMemoryRecordStore::new()));
        registry
            .create(&Estudante::new("1", "Ana Lima"), Emit::Publish)
            .await
            .unwrap();
        registry
            .create(&Estudante::new("2", "Bruno Reis"), Emit::Publish)
            .await
            .unwrap();

        let mut received = 0;
        for _ in 0..200 {
            received = server.received_requests().await.map_or(0, |r| r.len());
            if received == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(received, 2);

        let stats = runtime.shutdown().await.unwrap();
        assert_eq!(stats.failed, 2);
        assert!(runtime.container().canonical_store.mappings().unwrap().is_empty());
        // Source writes stay committed.
        assert_eq!(registry.load_all().unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_update_events_never_reach_remote() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u-1"})))
            .expect(0)
            .mount(&server)
            .await;

        let runtime = SyncRuntime::new(config(server.uri())).unwrap();
        runtime.start().unwrap();

        let registry = runtime.source_repository::<Estudante>(Arc::new(InMemoryRecordStore::new()));
        registry
            .create(&Estudante::new("1", "Ana Lima"), Emit::Suppress)
            .await
            .unwrap();
        registry
            .update(&Estudante::new("1", "Ana Lima Souza"), Emit::Publish)
            .await
            .unwrap();

        let container = runtime.container();
        let bus = container.event_bus.clone();
        assert!(eventually(|| bus.events_published() == 1).await);

        // Give the listener a moment to pick the event up before stopping.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let stats = runtime.shutdown().await.unwrap();
        assert_eq!(stats.synchronized, 0);
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let mut cfg = config("localhost:8080".into());
        assert!(SyncRuntime::new(cfg.clone()).is_err());

        cfg.remote.base_url = "http://localhost:8080".into();
        cfg.channel.topic = String::new();
        let err = SyncRuntime::new(cfg).err().expect("empty topic rejected");
        assert!(format!("{err:#}").contains("topic"));
    }
}
