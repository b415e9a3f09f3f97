//! Port abstraction for module persistence adapters and their errors.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Module, ModuleDraft, ModuleUpdate, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by module repository adapters.
    pub enum ModulePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "module repository connection failed: {message}",
        /// The owning path does not exist.
        MissingPath { id: Uuid } => "path {id} does not exist",
        /// A referenced module does not exist.
        MissingModule { id: Uuid } => "module {id} does not exist",
        /// Query or mutation failed during execution.
        Query { message: String } => "module repository query failed: {message}",
    }
}

/// Storage operations for modules and completion records.
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    /// List every module in insertion order.
    async fn list(&self) -> Result<Vec<Module>, ModulePersistenceError>;

    /// List the modules belonging to a path, in insertion order.
    async fn list_by_path(&self, path_id: Uuid) -> Result<Vec<Module>, ModulePersistenceError>;

    /// Insert a new module, assigning id and creation timestamp.
    async fn insert(&self, draft: ModuleDraft) -> Result<Module, ModulePersistenceError>;

    /// Apply a partial update; `None` when the module does not exist.
    async fn update(
        &self,
        update: ModuleUpdate,
    ) -> Result<Option<Module>, ModulePersistenceError>;

    /// Delete a module; `false` when it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, ModulePersistenceError>;

    /// Record a completion, skipping the insert when the pair already exists.
    async fn mark_completed(
        &self,
        user: &UserId,
        module_id: Uuid,
    ) -> Result<(), ModulePersistenceError>;
}
