//! Concept service: catalogue and learned-concept tracking.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{ConceptPersistenceError, ConceptRepository};
use crate::domain::{Concept, ConceptDraft, DomainError, DomainResult, UserId};

/// Service managing concepts and learned-concept records.
#[derive(Clone)]
pub struct ConceptService {
    concepts: Arc<dyn ConceptRepository>,
}

fn map_persistence_error(error: ConceptPersistenceError) -> DomainError {
    match error {
        ConceptPersistenceError::Connection { message } => {
            DomainError::service_unavailable(message)
        }
        ConceptPersistenceError::MissingConcept { id } => {
            DomainError::not_found("concept does not exist")
                .with_details(json!({ "conceptId": id }))
        }
        ConceptPersistenceError::Query { message } => DomainError::internal(message),
    }
}

impl ConceptService {
    /// Create a new service with the given repository.
    pub fn new(concepts: Arc<dyn ConceptRepository>) -> Self {
        Self { concepts }
    }

    /// List every concept in insertion order.
    pub async fn list(&self) -> DomainResult<Vec<Concept>> {
        self.concepts.list().await.map_err(map_persistence_error)
    }

    /// Add a concept to the catalogue.
    pub async fn create(&self, draft: ConceptDraft) -> DomainResult<Concept> {
        self.concepts
            .insert(draft)
            .await
            .map_err(map_persistence_error)
    }

    /// Mark a concept learned; repeating the call is an idempotent no-op.
    pub async fn learn(&self, user: &UserId, concept_id: Uuid) -> DomainResult<bool> {
        self.concepts
            .mark_learned(user, concept_id)
            .await
            .map_err(map_persistence_error)?;
        Ok(true)
    }

    /// List the concepts the user has learned, in learning order.
    pub async fn learned_by(&self, user: &UserId) -> DomainResult<Vec<Concept>> {
        self.concepts
            .learned_by(user)
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[derive(Default)]
    struct StubState {
        concepts: Vec<Concept>,
        learned: Vec<(UserId, Uuid)>,
    }

    #[derive(Default)]
    struct StubConceptRepository {
        state: Mutex<StubState>,
    }

    #[async_trait]
    impl ConceptRepository for StubConceptRepository {
        async fn list(&self) -> Result<Vec<Concept>, ConceptPersistenceError> {
            Ok(self.state.lock().expect("state lock").concepts.clone())
        }

        async fn insert(&self, draft: ConceptDraft) -> Result<Concept, ConceptPersistenceError> {
            let concept = Concept::new(Uuid::new_v4(), draft);
            self.state
                .lock()
                .expect("state lock")
                .concepts
                .push(concept.clone());
            Ok(concept)
        }

        async fn mark_learned(
            &self,
            user: &UserId,
            concept_id: Uuid,
        ) -> Result<(), ConceptPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if !state
                .concepts
                .iter()
                .any(|concept| concept.id() == concept_id)
            {
                return Err(ConceptPersistenceError::missing_concept(concept_id));
            }
            if !state.learned.contains(&(*user, concept_id)) {
                state.learned.push((*user, concept_id));
            }
            Ok(())
        }

        async fn learned_by(
            &self,
            user: &UserId,
        ) -> Result<Vec<Concept>, ConceptPersistenceError> {
            let state = self.state.lock().expect("state lock");
            Ok(state
                .learned
                .iter()
                .filter(|(learner, _)| learner == user)
                .filter_map(|(_, id)| {
                    state
                        .concepts
                        .iter()
                        .find(|concept| concept.id() == *id)
                        .cloned()
                })
                .collect())
        }
    }

    #[rstest]
    #[actix_rt::test]
    async fn learning_twice_records_one_entry() {
        let svc = ConceptService::new(Arc::new(StubConceptRepository::default()));
        let concept = svc
            .create(ConceptDraft::new("closures", "").expect("valid draft"))
            .await
            .expect("create succeeds");
        let user = UserId::random();

        assert!(svc.learn(&user, concept.id()).await.expect("first"));
        assert!(svc.learn(&user, concept.id()).await.expect("second"));
        let learned = svc.learned_by(&user).await.expect("list succeeds");
        assert_eq!(learned.len(), 1);
    }

    #[rstest]
    #[actix_rt::test]
    async fn learning_unknown_concepts_is_not_found() {
        let svc = ConceptService::new(Arc::new(StubConceptRepository::default()));
        let err = svc
            .learn(&UserId::random(), Uuid::new_v4())
            .await
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
