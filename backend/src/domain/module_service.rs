//! Module service: CRUD and completion tracking.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{ModulePersistenceError, ModuleRepository};
use crate::domain::{DomainError, DomainResult, Module, ModuleDraft, ModuleUpdate, UserId};

/// Service managing modules and completion records.
#[derive(Clone)]
pub struct ModuleService {
    modules: Arc<dyn ModuleRepository>,
}

fn map_persistence_error(error: ModulePersistenceError) -> DomainError {
    match error {
        ModulePersistenceError::Connection { message } => {
            DomainError::service_unavailable(message)
        }
        ModulePersistenceError::MissingPath { id } => {
            DomainError::not_found("path does not exist").with_details(json!({ "pathId": id }))
        }
        ModulePersistenceError::MissingModule { id } => {
            DomainError::not_found("module does not exist")
                .with_details(json!({ "moduleId": id }))
        }
        ModulePersistenceError::Query { message } => DomainError::internal(message),
    }
}

impl ModuleService {
    /// Create a new service with the given repository.
    pub fn new(modules: Arc<dyn ModuleRepository>) -> Self {
        Self { modules }
    }

    /// List every module in insertion order.
    pub async fn list(&self) -> DomainResult<Vec<Module>> {
        self.modules.list().await.map_err(map_persistence_error)
    }

    /// List the modules of one path, in insertion order.
    pub async fn list_by_path(&self, path_id: Uuid) -> DomainResult<Vec<Module>> {
        self.modules
            .list_by_path(path_id)
            .await
            .map_err(map_persistence_error)
    }

    /// Create a module under an existing path.
    pub async fn create(&self, draft: ModuleDraft) -> DomainResult<Module> {
        self.modules
            .insert(draft)
            .await
            .map_err(map_persistence_error)
    }

    /// Apply a partial update, failing with `not_found` on a miss.
    pub async fn update(&self, update: ModuleUpdate) -> DomainResult<Module> {
        let id = update.id;
        self.modules
            .update(update)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| {
                DomainError::not_found("module does not exist")
                    .with_details(json!({ "moduleId": id }))
            })
    }

    /// Delete a module, failing with `not_found` when nothing was removed.
    pub async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let deleted = self
            .modules
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if deleted {
            Ok(true)
        } else {
            Err(DomainError::not_found("module does not exist")
                .with_details(json!({ "moduleId": id })))
        }
    }

    /// Record a completion; repeating a completion is an idempotent no-op.
    pub async fn complete(&self, user: &UserId, module_id: Uuid) -> DomainResult<bool> {
        self.modules
            .mark_completed(user, module_id)
            .await
            .map_err(map_persistence_error)?;
        Ok(true)
    }
}
