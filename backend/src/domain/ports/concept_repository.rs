//! Port abstraction for concept persistence adapters and their errors.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Concept, ConceptDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by concept repository adapters.
    pub enum ConceptPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "concept repository connection failed: {message}",
        /// A referenced concept does not exist.
        MissingConcept { id: Uuid } => "concept {id} does not exist",
        /// Query or mutation failed during execution.
        Query { message: String } => "concept repository query failed: {message}",
    }
}

/// Storage operations for concepts and learned-concept records.
#[async_trait]
pub trait ConceptRepository: Send + Sync {
    /// List every concept in insertion order.
    async fn list(&self) -> Result<Vec<Concept>, ConceptPersistenceError>;

    /// Insert a new concept, assigning an id.
    async fn insert(&self, draft: ConceptDraft) -> Result<Concept, ConceptPersistenceError>;

    /// Record that a user learned a concept, skipping existing pairs.
    async fn mark_learned(
        &self,
        user: &UserId,
        concept_id: Uuid,
    ) -> Result<(), ConceptPersistenceError>;

    /// List the concepts a user has learned, in learning order.
    async fn learned_by(&self, user: &UserId) -> Result<Vec<Concept>, ConceptPersistenceError>;
}
