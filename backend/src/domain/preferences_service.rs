//! User preferences service.
//!
//! Preferences are created lazily: the first read materialises defaults so
//! callers never distinguish "no row yet" from "default settings".

use std::sync::Arc;

use chrono::Utc;

use crate::domain::ports::{PreferencesPersistenceError, PreferencesRepository};
use crate::domain::{DomainError, DomainResult, PreferencesUpdate, UserId, UserPreferences};

/// Service managing per-user preferences.
#[derive(Clone)]
pub struct PreferencesService {
    preferences: Arc<dyn PreferencesRepository>,
}

fn map_persistence_error(error: PreferencesPersistenceError) -> DomainError {
    match error {
        PreferencesPersistenceError::Connection { message } => {
            DomainError::service_unavailable(message)
        }
        PreferencesPersistenceError::Query { message } => DomainError::internal(message),
    }
}

impl PreferencesService {
    /// Create a new service with the given repository.
    pub fn new(preferences: Arc<dyn PreferencesRepository>) -> Self {
        Self { preferences }
    }

    /// Fetch the user's preferences, materialising defaults on first read.
    pub async fn get(&self, user: &UserId) -> DomainResult<UserPreferences> {
        if let Some(existing) = self
            .preferences
            .find(user)
            .await
            .map_err(map_persistence_error)?
        {
            return Ok(existing);
        }

        let defaults = UserPreferences::defaults(*user, Utc::now());
        self.preferences
            .upsert(&defaults)
            .await
            .map_err(map_persistence_error)?;
        Ok(defaults)
    }

    /// Apply a partial update and return the stored result.
    pub async fn update(
        &self,
        user: &UserId,
        update: PreferencesUpdate,
    ) -> DomainResult<UserPreferences> {
        let current = self.get(user).await?;
        let updated = current.apply(update, Utc::now());
        self.preferences
            .upsert(&updated)
            .await
            .map_err(map_persistence_error)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;

    #[derive(Default)]
    struct StubPreferencesRepository {
        stored: Mutex<HashMap<UserId, UserPreferences>>,
    }

    #[async_trait]
    impl PreferencesRepository for StubPreferencesRepository {
        async fn find(
            &self,
            user: &UserId,
        ) -> Result<Option<UserPreferences>, PreferencesPersistenceError> {
            Ok(self.stored.lock().expect("state lock").get(user).cloned())
        }

        async fn upsert(
            &self,
            preferences: &UserPreferences,
        ) -> Result<(), PreferencesPersistenceError> {
            self.stored
                .lock()
                .expect("state lock")
                .insert(*preferences.user_id(), preferences.clone());
            Ok(())
        }
    }

    #[rstest]
    #[actix_rt::test]
    async fn first_read_materialises_defaults() {
        let repo = Arc::new(StubPreferencesRepository::default());
        let svc = PreferencesService::new(repo.clone());
        let user = UserId::random();

        let prefs = svc.get(&user).await.expect("get succeeds");
        assert!(prefs.reminder_emails());
        assert!(
            repo.stored.lock().expect("state lock").contains_key(&user),
            "defaults are persisted"
        );
    }

    #[rstest]
    #[actix_rt::test]
    async fn updates_persist_across_reads() {
        let svc = PreferencesService::new(Arc::new(StubPreferencesRepository::default()));
        let user = UserId::random();

        let update = PreferencesUpdate {
            reminder_emails: Some(false),
            ..PreferencesUpdate::default()
        };
        svc.update(&user, update).await.expect("update succeeds");

        let prefs = svc.get(&user).await.expect("get succeeds");
        assert!(!prefs.reminder_emails());
        assert!(!prefs.public_profile(), "untouched field keeps its default");
    }
}
