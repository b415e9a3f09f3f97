//! PostgreSQL-backed `CharacterRepository` implementation using Diesel ORM.
//!
//! Characters are addressed by (user, slot); the unique constraint on that
//! pair is what turns a double-create into a conflict rather than a second
//! row.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CharacterPersistenceError, CharacterRepository};
use crate::domain::{Character, CharacterDraft, CharacterIndex, CharacterUpdate, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{CharacterRow, NewCharacterRow};
use super::pool::{DbPool, PoolError};
use super::schema::characters;

/// Diesel-backed implementation of the character repository port.
#[derive(Clone)]
pub struct DieselCharacterRepository {
    pool: DbPool,
}

impl DieselCharacterRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> CharacterPersistenceError {
    map_pool_error(error, CharacterPersistenceError::connection)
}

fn map_read_error(error: diesel::result::Error) -> CharacterPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => CharacterPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            CharacterPersistenceError::query("unexpected constraint violation on read")
        }
        DieselFailure::Query { message } => CharacterPersistenceError::query(message),
    }
}

/// Convert a database row into a validated domain character.
fn row_to_character(row: CharacterRow) -> Result<Character, CharacterPersistenceError> {
    let CharacterRow {
        id,
        user_id,
        slot,
        name,
        created_at,
    } = row;
    let slot = u16::try_from(slot)
        .map_err(|_| CharacterPersistenceError::query("character slot out of range"))?;
    let draft = CharacterDraft::new(slot, &name)
        .map_err(|err| CharacterPersistenceError::query(err.to_string()))?;
    Ok(Character::new(
        id,
        UserId::from_uuid(user_id),
        draft,
        created_at,
    ))
}

#[async_trait]
impl CharacterRepository for DieselCharacterRepository {
    async fn list_for(
        &self,
        user: &UserId,
    ) -> Result<Vec<Character>, CharacterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<CharacterRow> = characters::table
            .filter(characters::user_id.eq(user.as_uuid()))
            .order(characters::slot.asc())
            .select(CharacterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_character).collect()
    }

    async fn find_by_index(
        &self,
        user: &UserId,
        index: CharacterIndex,
    ) -> Result<Option<Character>, CharacterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<CharacterRow> = characters::table
            .filter(characters::user_id.eq(user.as_uuid()))
            .filter(characters::slot.eq(i32::from(index.value())))
            .select(CharacterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_character).transpose()
    }

    async fn insert(
        &self,
        user: &UserId,
        draft: CharacterDraft,
    ) -> Result<Character, CharacterPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row = NewCharacterRow {
            id: Uuid::new_v4(),
            user_id: *user.as_uuid(),
            slot: i32::from(draft.index.value()),
            name: &draft.name,
            created_at: Utc::now(),
        };

        let stored: CharacterRow = diesel::insert_into(characters::table)
            .values(&row)
            .returning(CharacterRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(error) {
                DieselFailure::UniqueViolation { .. } => {
                    CharacterPersistenceError::duplicate_index(draft.index.value())
                }
                DieselFailure::ForeignKeyViolation => {
                    CharacterPersistenceError::query("owner does not exist")
                }
                DieselFailure::Connection { message } => {
                    CharacterPersistenceError::connection(message)
                }
                DieselFailure::Query { message } => CharacterPersistenceError::query(message),
            })?;

        row_to_character(stored)
    }

    async fn update_by_index(
        &self,
        user: &UserId,
        index: CharacterIndex,
        update: CharacterUpdate,
    ) -> Result<Option<Character>, CharacterPersistenceError> {
        let Some(name) = update.name else {
            // No fields to change; a bare existence check keeps the
            // not-found contract intact.
            return self.find_by_index(user, index).await;
        };

        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<CharacterRow> = diesel::update(
            characters::table
                .filter(characters::user_id.eq(user.as_uuid()))
                .filter(characters::slot.eq(i32::from(index.value()))),
        )
        .set(characters::name.eq(&name))
        .returning(CharacterRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_read_error)?;

        row.map(row_to_character).transpose()
    }
}
