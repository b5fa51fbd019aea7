//! # Entity Registry
//!
//! Routing table from entity type tag to transformer, eligibility rule,
//! remote destination and canonicalization flag. Tags match ignoring ASCII
//! case.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cs_02_entity_transform::{EntityTransformer, StudentTransformer};
use shared_types::{ChangeEvent, OperationKind, SourceSystem};

/// Remote destination of students.
pub const STUDENT_DESTINATION: &str = "/usuarios";

/// Predicate deciding whether an event is synchronized.
pub type Eligibility = Arc<dyn Fn(&ChangeEvent) -> bool + Send + Sync>;

/// Default rule: creates on the ORM system-of-record only.
#[must_use]
pub fn create_from_source_a(event: &ChangeEvent) -> bool {
    event.operation == OperationKind::Create && event.source == SourceSystem::SourceA
}

/// Destination for an entity type with no registered route.
///
/// ```
/// use cs_05_pipeline::default_destination;
///
/// assert_eq!(default_destination("Professor"), "/professors");
/// ```
#[must_use]
pub fn default_destination(entity_type: &str) -> String {
    format!("/{}s", entity_type.to_lowercase())
}

/// How one entity type is synchronized.
#[derive(Clone)]
pub struct EntityRoute {
    entity_type: String,
    transformer: Arc<dyn EntityTransformer>,
    eligibility: Eligibility,
    destination: String,
    canonicalize: bool,
}

impl EntityRoute {
    /// Route for the transformer's entity type, with the default eligibility
    /// rule and no canonicalization.
    pub fn new(transformer: Arc<dyn EntityTransformer>, destination: impl Into<String>) -> Self {
        Self {
            entity_type: transformer.entity_type().to_string(),
            transformer,
            eligibility: Arc::new(create_from_source_a),
            destination: destination.into(),
            canonicalize: false,
        }
    }

    #[must_use]
    pub fn with_eligibility(
        mut self,
        eligibility: impl Fn(&ChangeEvent) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.eligibility = Arc::new(eligibility);
        self
    }

    /// Run the canonicalization step after a successful dispatch.
    #[must_use]
    pub fn canonicalized(mut self) -> Self {
        self.canonicalize = true;
        self
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn transformer(&self) -> &dyn EntityTransformer {
        self.transformer.as_ref()
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn canonicalize(&self) -> bool {
        self.canonicalize
    }

    pub fn is_eligible(&self, event: &ChangeEvent) -> bool {
        (self.eligibility)(event)
    }
}

impl fmt::Debug for EntityRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRoute")
            .field("entity_type", &self.entity_type)
            .field("destination", &self.destination)
            .field("canonicalize", &self.canonicalize)
            .finish_non_exhaustive()
    }
}

/// Case-insensitive table of entity routes.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    routes: HashMap<String, EntityRoute>,
}

impl EntityRegistry {
    /// Registry with no routes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the student route: `Estudante` to `/usuarios`,
    /// canonicalized.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            EntityRoute::new(Arc::new(StudentTransformer::new()), STUDENT_DESTINATION)
                .canonicalized(),
        );
        registry
    }

    /// Add or replace the route for its entity type.
    pub fn register(&mut self, route: EntityRoute) {
        self.routes
            .insert(route.entity_type.to_lowercase(), route);
    }

    pub fn route(&self, entity_type: &str) -> Option<&EntityRoute> {
        self.routes.get(&entity_type.to_lowercase())
    }

    /// Whether `event` passes its route's rule, or the default rule when the
    /// type has no route.
    pub fn is_eligible(&self, event: &ChangeEvent) -> bool {
        match self.route(&event.entity_type) {
            Some(route) => route.is_eligible(event),
            None => create_from_source_a(event),
        }
    }

    /// Remote path for an entity type.
    pub fn destination(&self, entity_type: &str) -> String {
        match self.route(entity_type) {
            Some(route) => route.destination.clone(),
            None => default_destination(entity_type),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
