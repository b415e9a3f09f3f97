//! Learning module data model.
//!
//! A module is a unit of learning content belonging to exactly one path.
//! Users record completion via [`ModuleCompletion`] join records; the pair
//! (user, module) is unique.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Validation errors returned by the module constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleValidationError {
    /// Title was missing or blank once trimmed.
    EmptyTitle,
    /// Content was missing or blank once trimmed.
    EmptyContent,
}

impl fmt::Display for ModuleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "module title must not be empty"),
            Self::EmptyContent => write!(f, "module content must not be empty"),
        }
    }
}

impl std::error::Error for ModuleValidationError {}

/// A unit of learning content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: Uuid,
    title: String,
    content: String,
    path_id: Uuid,
    created_at: DateTime<Utc>,
}

/// Validated payload for creating a module; id and timestamp are assigned by
/// the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDraft {
    /// Display title, trimmed.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Owning path.
    pub path_id: Uuid,
}

impl ModuleDraft {
    /// Validate raw module fields into a draft.
    pub fn new(
        title: &str,
        content: &str,
        path_id: Uuid,
    ) -> Result<Self, ModuleValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ModuleValidationError::EmptyTitle);
        }
        if content.trim().is_empty() {
            return Err(ModuleValidationError::EmptyContent);
        }
        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
            path_id,
        })
    }
}

/// Partial update applied to an existing module.
///
/// `None` fields are left untouched; a present field replaces the stored
/// value after the same validation as [`ModuleDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleUpdate {
    /// Module to update.
    pub id: Uuid,
    /// Replacement title, if any.
    pub title: Option<String>,
    /// Replacement content, if any.
    pub content: Option<String>,
}

impl ModuleUpdate {
    /// Validate a partial update payload.
    pub fn new(
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, ModuleValidationError> {
        let title = match title {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(ModuleValidationError::EmptyTitle);
                }
                Some(trimmed.to_owned())
            }
            None => None,
        };
        let content = match content {
            Some(raw) => {
                if raw.trim().is_empty() {
                    return Err(ModuleValidationError::EmptyContent);
                }
                Some(raw.to_owned())
            }
            None => None,
        };
        Ok(Self { id, title, content })
    }
}

impl Module {
    /// Build a [`Module`] from validated components.
    pub fn new(id: Uuid, draft: ModuleDraft, created_at: DateTime<Utc>) -> Self {
        let ModuleDraft {
            title,
            content,
            path_id,
        } = draft;
        Self {
            id,
            title,
            content,
            path_id,
            created_at,
        }
    }

    /// Stable module identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Body content.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Owning path.
    pub const fn path_id(&self) -> Uuid {
        self.path_id
    }

    /// Record creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Join record marking a module completed by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCompletion {
    id: Uuid,
    user_id: UserId,
    module_id: Uuid,
    completed_at: DateTime<Utc>,
}

impl ModuleCompletion {
    /// Build a completion record from storage fields.
    pub const fn new(
        id: Uuid,
        user_id: UserId,
        module_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            module_id,
            completed_at,
        }
    }

    /// Join record identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Completing user.
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Completed module.
    pub const fn module_id(&self) -> Uuid {
        self.module_id
    }

    /// Completion timestamp.
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
