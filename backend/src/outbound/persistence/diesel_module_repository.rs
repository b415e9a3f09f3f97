//! PostgreSQL-backed `ModuleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ModulePersistenceError, ModuleRepository};
use crate::domain::{Module, ModuleDraft, ModuleUpdate, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{ModuleChangeset, ModuleRow, NewModuleCompletionRow, NewModuleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{module_completions, modules};

/// Diesel-backed implementation of the module repository port.
#[derive(Clone)]
pub struct DieselModuleRepository {
    pool: DbPool,
}

impl DieselModuleRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> ModulePersistenceError {
    map_pool_error(error, ModulePersistenceError::connection)
}

fn map_read_error(error: diesel::result::Error) -> ModulePersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => ModulePersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation => {
            ModulePersistenceError::query("unexpected constraint violation on read")
        }
        DieselFailure::Query { message } => ModulePersistenceError::query(message),
    }
}

/// Convert a database row into a validated domain module.
fn row_to_module(row: ModuleRow) -> Result<Module, ModulePersistenceError> {
    let ModuleRow {
        id,
        title,
        content,
        path_id,
        created_at,
    } = row;
    let draft = ModuleDraft::new(&title, &content, path_id)
        .map_err(|err| ModulePersistenceError::query(err.to_string()))?;
    Ok(Module::new(id, draft, created_at))
}

#[async_trait]
impl ModuleRepository for DieselModuleRepository {
    async fn list(&self) -> Result<Vec<Module>, ModulePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<ModuleRow> = modules::table
            .order((modules::created_at.asc(), modules::id.asc()))
            .select(ModuleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_module).collect()
    }

    async fn list_by_path(
        &self,
        path_id: Uuid,
    ) -> Result<Vec<Module>, ModulePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<ModuleRow> = modules::table
            .filter(modules::path_id.eq(path_id))
            .order((modules::created_at.asc(), modules::id.asc()))
            .select(ModuleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_module).collect()
    }

    async fn insert(&self, draft: ModuleDraft) -> Result<Module, ModulePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row = NewModuleRow {
            id: Uuid::new_v4(),
            title: &draft.title,
            content: &draft.content,
            path_id: draft.path_id,
            created_at: Utc::now(),
        };

        let stored: ModuleRow = diesel::insert_into(modules::table)
            .values(&row)
            .returning(ModuleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(error) {
                DieselFailure::ForeignKeyViolation => {
                    ModulePersistenceError::missing_path(draft.path_id)
                }
                DieselFailure::Connection { message } => {
                    ModulePersistenceError::connection(message)
                }
                DieselFailure::UniqueViolation { .. } => {
                    ModulePersistenceError::query("unexpected conflict on module insert")
                }
                DieselFailure::Query { message } => ModulePersistenceError::query(message),
            })?;

        row_to_module(stored)
    }

    async fn update(
        &self,
        update: ModuleUpdate,
    ) -> Result<Option<Module>, ModulePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        if update.title.is_none() && update.content.is_none() {
            // Nothing to change; report the current row so callers still get
            // a not-found signal for unknown ids.
            let row: Option<ModuleRow> = modules::table
                .filter(modules::id.eq(update.id))
                .select(ModuleRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_read_error)?;
            return row.map(row_to_module).transpose();
        }

        let changeset = ModuleChangeset {
            title: update.title.as_deref(),
            content: update.content.as_deref(),
        };

        let row: Option<ModuleRow> = diesel::update(modules::table)
            .filter(modules::id.eq(update.id))
            .set(&changeset)
            .returning(ModuleRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_module).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ModulePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let deleted = diesel::delete(modules::table.filter(modules::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(deleted > 0)
    }

    async fn mark_completed(
        &self,
        user: &UserId,
        module_id: Uuid,
    ) -> Result<(), ModulePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        diesel::insert_into(module_completions::table)
            .values(&NewModuleCompletionRow {
                id: Uuid::new_v4(),
                user_id: *user.as_uuid(),
                module_id,
                completed_at: Utc::now(),
            })
            .on_conflict((module_completions::user_id, module_completions::module_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(error) {
                DieselFailure::ForeignKeyViolation => {
                    ModulePersistenceError::missing_module(module_id)
                }
                DieselFailure::Connection { message } => {
                    ModulePersistenceError::connection(message)
                }
                DieselFailure::UniqueViolation { .. } => {
                    ModulePersistenceError::query("unexpected conflict on idempotent completion")
                }
                DieselFailure::Query { message } => ModulePersistenceError::query(message),
            })?;

        Ok(())
    }
}
