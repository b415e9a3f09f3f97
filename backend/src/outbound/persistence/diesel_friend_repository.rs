//! PostgreSQL-backed `FriendRepository` implementation using Diesel ORM.
//!
//! Pair lookups match either orientation of (user1, user2); the state
//! machine on top of these primitives lives in the friend service.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FriendPersistenceError, FriendRepository};
use crate::domain::{Friend, FriendDraft, FriendStatus, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{FriendRow, NewFriendRow};
use super::pool::{DbPool, PoolError};
use super::schema::friends;

/// Diesel-backed implementation of the friend repository port.
#[derive(Clone)]
pub struct DieselFriendRepository {
    pool: DbPool,
}

impl DieselFriendRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> FriendPersistenceError {
    map_pool_error(error, FriendPersistenceError::connection)
}

fn map_read_error(error: diesel::result::Error) -> FriendPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => FriendPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            FriendPersistenceError::query("unexpected constraint violation on read")
        }
        DieselFailure::Query { message } => FriendPersistenceError::query(message),
    }
}

/// Convert a database row into a validated domain friendship.
fn row_to_friend(row: FriendRow) -> Result<Friend, FriendPersistenceError> {
    let FriendRow {
        id,
        user1_id,
        user2_id,
        status,
        created_at,
    } = row;
    let status = FriendStatus::parse(&status).ok_or_else(|| {
        FriendPersistenceError::query(format!("unknown friend status {status:?}"))
    })?;
    Ok(Friend::new(
        id,
        UserId::from_uuid(user1_id),
        UserId::from_uuid(user2_id),
        status,
        created_at,
    ))
}

#[async_trait]
impl FriendRepository for DieselFriendRepository {
    async fn insert(&self, draft: FriendDraft) -> Result<Friend, FriendPersistenceError> {
        // The unique constraint only covers one orientation, so check the
        // mirrored pair first; the race between the check and the insert is
        // closed by the constraint itself.
        if self
            .find_pair(&draft.user1_id, &draft.user2_id)
            .await?
            .is_some()
        {
            return Err(FriendPersistenceError::duplicate_pair());
        }

        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row = NewFriendRow {
            id: Uuid::new_v4(),
            user1_id: *draft.user1_id.as_uuid(),
            user2_id: *draft.user2_id.as_uuid(),
            status: FriendStatus::Pending.as_str(),
            created_at: Utc::now(),
        };

        let stored: FriendRow = diesel::insert_into(friends::table)
            .values(&row)
            .returning(FriendRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(error) {
                DieselFailure::UniqueViolation { .. } => {
                    FriendPersistenceError::duplicate_pair()
                }
                DieselFailure::ForeignKeyViolation => {
                    FriendPersistenceError::query("referenced user does not exist")
                }
                DieselFailure::Connection { message } => {
                    FriendPersistenceError::connection(message)
                }
                DieselFailure::Query { message } => FriendPersistenceError::query(message),
            })?;

        row_to_friend(stored)
    }

    async fn find_pair(
        &self,
        user1: &UserId,
        user2: &UserId,
    ) -> Result<Option<Friend>, FriendPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<FriendRow> = friends::table
            .filter(
                friends::user1_id
                    .eq(user1.as_uuid())
                    .and(friends::user2_id.eq(user2.as_uuid()))
                    .or(friends::user1_id
                        .eq(user2.as_uuid())
                        .and(friends::user2_id.eq(user1.as_uuid()))),
            )
            .select(FriendRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_friend).transpose()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: FriendStatus,
    ) -> Result<Option<Friend>, FriendPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<FriendRow> = diesel::update(friends::table.filter(friends::id.eq(id)))
            .set(friends::status.eq(status.as_str()))
            .returning(FriendRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_friend).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FriendPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let deleted = diesel::delete(friends::table.filter(friends::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(deleted > 0)
    }

    async fn friendships_of(
        &self,
        user: &UserId,
    ) -> Result<Vec<Friend>, FriendPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<FriendRow> = friends::table
            .filter(
                friends::user1_id
                    .eq(user.as_uuid())
                    .or(friends::user2_id.eq(user.as_uuid())),
            )
            .order(friends::created_at.asc())
            .select(FriendRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_friend).collect()
    }
}
