//! Port abstraction for user-preference persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{UserId, UserPreferences};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by preferences repository adapters.
    pub enum PreferencesPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "preferences repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "preferences repository query failed: {message}",
    }
}

/// Storage operations for per-user preferences.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Fetch a user's stored preferences, if any.
    async fn find(
        &self,
        user: &UserId,
    ) -> Result<Option<UserPreferences>, PreferencesPersistenceError>;

    /// Insert or replace a user's preferences.
    async fn upsert(
        &self,
        preferences: &UserPreferences,
    ) -> Result<(), PreferencesPersistenceError>;
}
