//! PostgreSQL-backed `PathRepository` implementation using Diesel ORM.
//!
//! Path creation writes the path, the creator's membership, and the initial
//! character inside one transaction so a failed character insert rolls the
//! path back. Duplicate joins lean on `ON CONFLICT DO NOTHING` against the
//! unique (user_id, path_id) pair rather than application-level locking.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PathPersistenceError, PathRepository};
use crate::domain::{Character, CharacterDraft, Path, PathName, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{
    CharacterRow, NewCharacterRow, NewPathMembershipRow, NewPathRow, PathRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{characters, path_memberships, paths};

/// Diesel-backed implementation of the path repository port.
#[derive(Clone)]
pub struct DieselPathRepository {
    pool: DbPool,
}

impl DieselPathRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> PathPersistenceError {
    map_pool_error(error, PathPersistenceError::connection)
}

fn map_read_error(error: diesel::result::Error) -> PathPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => PathPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            PathPersistenceError::query("unexpected constraint violation on read")
        }
        DieselFailure::Query { message } => PathPersistenceError::query(message),
    }
}

/// Convert a database row into a validated domain path.
fn row_to_path(row: PathRow) -> Result<Path, PathPersistenceError> {
    let PathRow {
        id,
        name,
        created_at,
    } = row;
    let name = PathName::new(name).map_err(|err| PathPersistenceError::query(err.to_string()))?;
    Ok(Path::new(id, name, created_at))
}

/// Convert a database row into a validated domain character.
fn row_to_character(row: CharacterRow) -> Result<Character, PathPersistenceError> {
    let CharacterRow {
        id,
        user_id,
        slot,
        name,
        created_at,
    } = row;
    let slot = u16::try_from(slot)
        .map_err(|_| PathPersistenceError::query("character slot out of range"))?;
    let draft = CharacterDraft::new(slot, &name)
        .map_err(|err| PathPersistenceError::query(err.to_string()))?;
    Ok(Character::new(
        id,
        UserId::from_uuid(user_id),
        draft,
        created_at,
    ))
}

#[async_trait]
impl PathRepository for DieselPathRepository {
    async fn list(&self) -> Result<Vec<Path>, PathPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<PathRow> = paths::table
            .order((paths::created_at.asc(), paths::id.asc()))
            .select(PathRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_path).collect()
    }

    async fn find_by_name(
        &self,
        name: &PathName,
    ) -> Result<Option<Path>, PathPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<PathRow> = paths::table
            .filter(paths::name.eq(name.as_str()))
            .select(PathRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_path).transpose()
    }

    async fn create_with_character(
        &self,
        name: PathName,
        creator: &UserId,
        character: CharacterDraft,
    ) -> Result<(Path, Character), PathPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let now = Utc::now();
        let creator_uuid = *creator.as_uuid();
        let path_name = name.as_str().to_owned();
        let slot = i32::from(character.index.value());
        let character_name = character.name.clone();

        let result = conn
            .transaction::<(PathRow, CharacterRow), diesel::result::Error, _>(|conn| {
                async move {
                    let path_row: PathRow = diesel::insert_into(paths::table)
                        .values(&NewPathRow {
                            id: Uuid::new_v4(),
                            name: &path_name,
                            created_at: now,
                        })
                        .returning(PathRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(path_memberships::table)
                        .values(&NewPathMembershipRow {
                            id: Uuid::new_v4(),
                            user_id: creator_uuid,
                            path_id: path_row.id,
                            joined_at: now,
                        })
                        .execute(conn)
                        .await?;

                    let character_row: CharacterRow =
                        diesel::insert_into(characters::table)
                            .values(&NewCharacterRow {
                                id: Uuid::new_v4(),
                                user_id: creator_uuid,
                                slot,
                                name: &character_name,
                                created_at: now,
                            })
                            .returning(CharacterRow::as_returning())
                            .get_result(conn)
                            .await?;

                    Ok((path_row, character_row))
                }
                .scope_boxed()
            })
            .await;

        let (path_row, character_row) = result.map_err(|error| {
            match classify_diesel_error(error) {
                // Two unique constraints can fire here: the path name and the
                // creator's character slot.
                DieselFailure::UniqueViolation { constraint } => {
                    if constraint
                        .as_deref()
                        .is_some_and(|violated| violated.contains("characters"))
                    {
                        PathPersistenceError::duplicate_character_slot(character.index.value())
                    } else {
                        PathPersistenceError::duplicate_name(name.as_str())
                    }
                }
                DieselFailure::ForeignKeyViolation => {
                    PathPersistenceError::query("creator does not exist")
                }
                DieselFailure::Connection { message } => {
                    PathPersistenceError::connection(message)
                }
                DieselFailure::Query { message } => PathPersistenceError::query(message),
            }
        })?;

        Ok((row_to_path(path_row)?, row_to_character(character_row)?))
    }

    async fn paths_for_user(&self, user: &UserId) -> Result<Vec<Path>, PathPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<PathRow> = path_memberships::table
            .inner_join(paths::table)
            .filter(path_memberships::user_id.eq(user.as_uuid()))
            .order(path_memberships::joined_at.asc())
            .select(PathRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_path).collect()
    }

    async fn add_memberships(
        &self,
        user: &UserId,
        ids: &[Uuid],
    ) -> Result<usize, PathPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        for path_id in ids {
            diesel::insert_into(path_memberships::table)
                .values(&NewPathMembershipRow {
                    id: Uuid::new_v4(),
                    user_id: *user.as_uuid(),
                    path_id: *path_id,
                    joined_at: Utc::now(),
                })
                .on_conflict((path_memberships::user_id, path_memberships::path_id))
                .do_nothing()
                .execute(&mut conn)
                .await
                .map_err(|error| match classify_diesel_error(error) {
                    DieselFailure::ForeignKeyViolation => {
                        PathPersistenceError::missing_path(*path_id)
                    }
                    DieselFailure::UniqueViolation { .. } => {
                        PathPersistenceError::query("unexpected conflict on idempotent join")
                    }
                    DieselFailure::Connection { message } => {
                        PathPersistenceError::connection(message)
                    }
                    DieselFailure::Query { message } => PathPersistenceError::query(message),
                })?;
        }

        Ok(ids.len())
    }
}
