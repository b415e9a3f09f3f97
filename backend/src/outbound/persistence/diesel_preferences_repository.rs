//! PostgreSQL-backed `PreferencesRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PreferencesPersistenceError, PreferencesRepository};
use crate::domain::{UserId, UserPreferences};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::UserPreferencesRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_preferences;

/// Diesel-backed implementation of the preferences repository port.
#[derive(Clone)]
pub struct DieselPreferencesRepository {
    pool: DbPool,
}

impl DieselPreferencesRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> PreferencesPersistenceError {
    map_pool_error(error, PreferencesPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PreferencesPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => {
            PreferencesPersistenceError::connection(message)
        }
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            PreferencesPersistenceError::query("unexpected constraint violation")
        }
        DieselFailure::Query { message } => PreferencesPersistenceError::query(message),
    }
}

fn row_to_preferences(row: UserPreferencesRow) -> UserPreferences {
    UserPreferences::new(
        UserId::from_uuid(row.user_id),
        row.reminder_emails,
        row.public_profile,
        row.updated_at,
    )
}

#[async_trait]
impl PreferencesRepository for DieselPreferencesRepository {
    async fn find(
        &self,
        user: &UserId,
    ) -> Result<Option<UserPreferences>, PreferencesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<UserPreferencesRow> = user_preferences::table
            .filter(user_preferences::user_id.eq(user.as_uuid()))
            .select(UserPreferencesRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_preferences))
    }

    async fn upsert(
        &self,
        preferences: &UserPreferences,
    ) -> Result<(), PreferencesPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row = UserPreferencesRow {
            user_id: *preferences.user_id().as_uuid(),
            reminder_emails: preferences.reminder_emails(),
            public_profile: preferences.public_profile(),
            updated_at: preferences.updated_at(),
        };

        diesel::insert_into(user_preferences::table)
            .values(&row)
            .on_conflict(user_preferences::user_id)
            .do_update()
            .set((
                user_preferences::reminder_emails.eq(row.reminder_emails),
                user_preferences::public_profile.eq(row.public_profile),
                user_preferences::updated_at.eq(row.updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }
}
