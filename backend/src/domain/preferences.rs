//! User preference settings.
//!
//! One record per user, created lazily with defaults on first read so new
//! accounts never see a missing-preferences error.

use chrono::{DateTime, Utc};

use super::UserId;

/// Per-user preference settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreferences {
    user_id: UserId,
    reminder_emails: bool,
    public_profile: bool,
    updated_at: DateTime<Utc>,
}

/// Partial update applied to a user's preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    /// Replacement reminder-email setting, if any.
    pub reminder_emails: Option<bool>,
    /// Replacement profile-visibility setting, if any.
    pub public_profile: Option<bool>,
}

impl UserPreferences {
    /// Build a preferences record from storage fields.
    pub const fn new(
        user_id: UserId,
        reminder_emails: bool,
        public_profile: bool,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            reminder_emails,
            public_profile,
            updated_at,
        }
    }

    /// Defaults applied when a user has no stored preferences yet.
    pub const fn defaults(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self::new(user_id, true, false, now)
    }

    /// Apply a partial update, refreshing the modification timestamp.
    #[must_use]
    pub fn apply(mut self, update: PreferencesUpdate, now: DateTime<Utc>) -> Self {
        if let Some(reminder_emails) = update.reminder_emails {
            self.reminder_emails = reminder_emails;
        }
        if let Some(public_profile) = update.public_profile {
            self.public_profile = public_profile;
        }
        self.updated_at = now;
        self
    }

    /// Owning user.
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Whether reminder emails are enabled.
    pub const fn reminder_emails(&self) -> bool {
        self.reminder_emails
    }

    /// Whether the profile is visible to non-friends.
    pub const fn public_profile(&self) -> bool {
        self.public_profile
    }

    /// Last modification timestamp.
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_enable_reminders_and_hide_profile() {
        let prefs = UserPreferences::defaults(UserId::random(), Utc::now());
        assert!(prefs.reminder_emails());
        assert!(!prefs.public_profile());
    }

    #[rstest]
    fn apply_patches_only_present_fields() {
        let created = Utc::now();
        let prefs = UserPreferences::defaults(UserId::random(), created);
        let update = PreferencesUpdate {
            public_profile: Some(true),
            ..PreferencesUpdate::default()
        };
        let updated = prefs.apply(update, Utc::now());
        assert!(updated.reminder_emails(), "untouched field is preserved");
        assert!(updated.public_profile());
        assert!(updated.updated_at() >= created);
    }
}
