//! # Pipeline Flows
//!
//! Change Event Source → channel → listener → pipeline, with a recording
//! remote double in place of the HTTP client.
//!
//! ```text
//! Repository<Estudante> ──publish──→ [InMemoryEventBus] ──→ EventListener
//!                                                               │
//!                                          PipelineController ←─┘
//!                                              │         │
//!                                   RecordingRemote   CanonicalStore
//! ```

#[cfg(test)]
mod tests {
    use serde_json::json;

    use cs_03_remote_sync::{DispatchError, HttpVerb};
    use shared_bus::EventPublisher;
    use shared_types::{Emit, SourceSystem};

    use crate::fixtures::{Estudante, Harness, Professor, RecordingRemote};

    fn maria() -> Estudante {
        Estudante::new("42", "Maria Clara Souza").born("1999-05-02")
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[tokio::test]
    async fn test_student_create_reaches_remote_and_canonical_store() {
        let mut h = Harness::start(RecordingRemote::answering(json!({"id": "u-1"})));
        let repo = h.repository::<Estudante>(SourceSystem::SourceA);

        repo.create(&maria(), Emit::Publish).await.unwrap();
        let stats = h.drain().await;
        assert_eq!(stats.synchronized, 1);

        let requests = h.remote.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].verb, HttpVerb::Post);
        assert_eq!(requests[0].path, "/usuarios");
        assert_eq!(
            requests[0].body,
            json!({"sobrenome": "Clara Souza", "prenome": "Maria", "situacaoMatricula": "ATIVO"})
        );

        let mappings = h.canonical.mappings().unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].source_system_id.as_deref(), Some("42"));
        assert_eq!(mappings[0].target_system_id.as_deref(), Some("u-1"));

        let student = h
            .canonical
            .student(&mappings[0].canonical_id)
            .unwrap()
            .expect("canonical student");
        assert_eq!(student.profile.given_name, "Maria");
        assert_eq!(student.profile.family_name, "Clara Souza");
        assert_eq!(student.profile.full_name, "Maria Clara Souza");
        assert_eq!(student.profile.birth_date, "1999-05-02");
        assert_eq!(student.profile.academic_status, "ATIVO");
    }

    #[tokio::test]
    async fn test_events_processed_in_publication_order() {
        let mut h = Harness::start(RecordingRemote::answering(json!({"id": "u"})));
        let repo = h.repository::<Estudante>(SourceSystem::SourceA);

        for (id, name) in [("1", "Ana Lima"), ("2", "Bruno Reis"), ("3", "Carla Dias")] {
            repo.create(&Estudante::new(id, name), Emit::Publish)
                .await
                .unwrap();
        }
        h.drain().await;

        let given: Vec<_> = h
            .remote
            .requests()
            .iter()
            .map(|r| r.body["prenome"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(given, vec!["Ana", "Bruno", "Carla"]);
    }

    // =========================================================================
    // ELIGIBILITY
    // =========================================================================

    #[tokio::test]
    async fn test_updates_and_deletes_are_not_synchronized() {
        let mut h = Harness::start(RecordingRemote::answering(json!({"id": "u-1"})));
        let repo = h.repository::<Estudante>(SourceSystem::SourceA);

        repo.create(&maria(), Emit::Suppress).await.unwrap();
        repo.update(&Estudante::new("42", "Maria C. Souza"), Emit::Publish)
            .await
            .unwrap();
        repo.delete(&maria(), Emit::Publish).await.unwrap();

        let stats = h.drain().await;
        assert_eq!(stats.received, 2);
        assert_eq!(stats.skipped, 2);
        assert!(h.remote.requests().is_empty());
        assert!(h.canonical.mappings().unwrap().is_empty());
        assert!(h.canonical.students().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_document_store_events_are_not_synchronized() {
        let mut h = Harness::start(RecordingRemote::answering(json!({"id": "u-1"})));
        let repo = h.repository::<Estudante>(SourceSystem::SourceB);

        repo.create(&maria(), Emit::Publish).await.unwrap();

        let stats = h.drain().await;
        assert_eq!(stats.skipped, 1);
        assert!(h.remote.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unrouted_entity_is_dropped() {
        let mut h = Harness::start(RecordingRemote::answering(json!({"id": "p-1"})));
        let repo = h.repository::<Professor>(SourceSystem::SourceA);

        repo.create(
            &Professor {
                id: "9".into(),
                nome: "Paulo Freire".into(),
            },
            Emit::Publish,
        )
        .await
        .unwrap();

        let stats = h.drain().await;
        assert_eq!(stats.failed, 1);
        assert!(h.remote.requests().is_empty());
    }

    // =========================================================================
    // FAILURES AND LOOP PREVENTION
    // =========================================================================

    #[tokio::test]
    async fn test_remote_failure_leaves_no_canonical_records() {
        let mut h = Harness::start(RecordingRemote::failing(DispatchError::Status {
            status: 500,
            body: "boom".into(),
        }));
        let repo = h.repository::<Estudante>(SourceSystem::SourceA);

        repo.create(&maria(), Emit::Publish).await.unwrap();
        repo.create(&Estudante::new("43", "Ana Lima"), Emit::Publish)
            .await
            .unwrap();

        let stats = h.drain().await;
        assert_eq!(stats.failed, 2);
        // Listener keeps going after the first failure.
        assert_eq!(h.remote.requests().len(), 2);
        assert!(h.canonical.mappings().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_canonical_writes_do_not_reenter_channel() {
        let mut h = Harness::start(RecordingRemote::answering(json!({"id": "u-1"})));
        let repo = h.repository::<Estudante>(SourceSystem::SourceA);

        repo.create(&maria(), Emit::Publish).await.unwrap();
        let stats = h.drain().await;

        // One source write published; two canonical writes were not.
        assert_eq!(h.bus.events_published(), 1);
        assert_eq!(stats.received, 1);
        assert_eq!(h.canonical.students().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_redelivered_create_duplicates_canonical_entity() {
        let mut h = Harness::start(RecordingRemote::answering(json!({"id": "u-1"})));
        let first = h.repository::<Estudante>(SourceSystem::SourceA);
        let second = h.repository::<Estudante>(SourceSystem::SourceA);

        // Same source record created in two stores: two identical events.
        first.create(&maria(), Emit::Publish).await.unwrap();
        second.create(&maria(), Emit::Publish).await.unwrap();
        h.drain().await;

        let mappings = h.canonical.mappings().unwrap();
        assert_eq!(mappings.len(), 2);
        assert_ne!(mappings[0].canonical_id, mappings[1].canonical_id);
        assert!(mappings
            .iter()
            .all(|m| m.source_system_id.as_deref() == Some("42")));
    }
}
