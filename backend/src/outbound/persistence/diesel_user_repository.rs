//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserDraft, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn map_insert_error(email: &EmailAddress) -> impl Fn(diesel::result::Error) -> UserPersistenceError {
    let email = email.as_str().to_owned();
    move |error| match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { .. } => {
            UserPersistenceError::duplicate_email(email.clone())
        }
        DieselFailure::Connection { message } => UserPersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation => {
            UserPersistenceError::query("unexpected foreign key violation")
        }
        DieselFailure::Query { message } => UserPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            UserPersistenceError::query("unexpected constraint violation on read")
        }
        DieselFailure::Query { message } => UserPersistenceError::query(message),
    }
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        first_name,
        last_name,
        email,
        password_hash,
        created_at,
    } = row;
    let draft = UserDraft::new(&first_name, &last_name, &email, password_hash)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(UserId::from_uuid(id), draft, created_at))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, draft: UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row = NewUserRow {
            id: Uuid::new_v4(),
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            email: draft.email.as_str(),
            password_hash: &draft.password_hash,
            created_at: Utc::now(),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error(&draft.email))?;

        row_to_user(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }
}
