//! PostgreSQL-backed `ConceptRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ConceptPersistenceError, ConceptRepository};
use crate::domain::{Concept, ConceptDraft, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{ConceptRow, NewConceptRow, NewLearnedConceptRow};
use super::pool::{DbPool, PoolError};
use super::schema::{concepts, learned_concepts};

/// Diesel-backed implementation of the concept repository port.
#[derive(Clone)]
pub struct DieselConceptRepository {
    pool: DbPool,
}

impl DieselConceptRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> ConceptPersistenceError {
    map_pool_error(error, ConceptPersistenceError::connection)
}

fn map_read_error(error: diesel::result::Error) -> ConceptPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => ConceptPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            ConceptPersistenceError::query("unexpected constraint violation on read")
        }
        DieselFailure::Query { message } => ConceptPersistenceError::query(message),
    }
}

/// Convert a database row into a validated domain concept.
fn row_to_concept(row: ConceptRow) -> Result<Concept, ConceptPersistenceError> {
    let ConceptRow {
        id,
        name,
        description,
    } = row;
    let draft = ConceptDraft::new(&name, &description)
        .map_err(|err| ConceptPersistenceError::query(err.to_string()))?;
    Ok(Concept::new(id, draft))
}

#[async_trait]
impl ConceptRepository for DieselConceptRepository {
    async fn list(&self) -> Result<Vec<Concept>, ConceptPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<ConceptRow> = concepts::table
            .order(concepts::id.asc())
            .select(ConceptRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_concept).collect()
    }

    async fn insert(&self, draft: ConceptDraft) -> Result<Concept, ConceptPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row = NewConceptRow {
            id: Uuid::new_v4(),
            name: &draft.name,
            description: &draft.description,
        };

        let stored: ConceptRow = diesel::insert_into(concepts::table)
            .values(&row)
            .returning(ConceptRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;

        row_to_concept(stored)
    }

    async fn mark_learned(
        &self,
        user: &UserId,
        concept_id: Uuid,
    ) -> Result<(), ConceptPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        diesel::insert_into(learned_concepts::table)
            .values(&NewLearnedConceptRow {
                id: Uuid::new_v4(),
                user_id: *user.as_uuid(),
                concept_id,
                learned_at: Utc::now(),
            })
            .on_conflict((learned_concepts::user_id, learned_concepts::concept_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(error) {
                DieselFailure::ForeignKeyViolation => {
                    ConceptPersistenceError::missing_concept(concept_id)
                }
                DieselFailure::Connection { message } => {
                    ConceptPersistenceError::connection(message)
                }
                DieselFailure::UniqueViolation { .. } => {
                    ConceptPersistenceError::query("unexpected conflict on idempotent learn")
                }
                DieselFailure::Query { message } => ConceptPersistenceError::query(message),
            })?;

        Ok(())
    }

    async fn learned_by(&self, user: &UserId) -> Result<Vec<Concept>, ConceptPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<ConceptRow> = learned_concepts::table
            .inner_join(concepts::table)
            .filter(learned_concepts::user_id.eq(user.as_uuid()))
            .order(learned_concepts::learned_at.asc())
            .select(ConceptRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_concept).collect()
    }
}
