//! PostgreSQL-backed `StorageLifecycle` implementation.
//!
//! Deletes child tables before their parents so foreign keys never block the
//! sweep. Only the seeder and the test harness reach this adapter.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StorageLifecycle, StorageLifecycleError};

use super::diesel_error_mapping::map_pool_error;
use super::pool::{DbPool, PoolError};
use super::schema::{
    characters, concepts, friends, learned_concepts, module_completions, modules,
    path_memberships, paths, user_preferences, users,
};

/// Diesel-backed implementation of the storage lifecycle port.
#[derive(Clone)]
pub struct DieselStorageLifecycle {
    pool: DbPool,
}

impl DieselStorageLifecycle {
    /// Create a new adapter with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> StorageLifecycleError {
    map_pool_error(error, StorageLifecycleError::connection)
}

fn map_reset_error(error: diesel::result::Error) -> StorageLifecycleError {
    StorageLifecycleError::reset(error.to_string())
}

#[async_trait]
impl StorageLifecycle for DieselStorageLifecycle {
    async fn reset_all(&self) -> Result<(), StorageLifecycleError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        // Children first, then parents.
        diesel::delete(learned_concepts::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(module_completions::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(path_memberships::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(characters::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(friends::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(user_preferences::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(modules::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(concepts::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(paths::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;
        diesel::delete(users::table)
            .execute(&mut conn)
            .await
            .map_err(map_reset_error)?;

        Ok(())
    }
}
