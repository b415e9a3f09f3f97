//! Character data model.
//!
//! A character is a per-user narrative companion created alongside path
//! enrolment. Characters are addressed by a per-user slot index rather than a
//! bare id, so clients can say "my second character" without knowing UUIDs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Validation errors returned by the character constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Slot index exceeded [`CHARACTER_INDEX_MAX`].
    IndexOutOfRange {
        /// Maximum accepted slot.
        max: u16,
    },
}

impl fmt::Display for CharacterValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "character name must not be empty"),
            Self::IndexOutOfRange { max } => {
                write!(f, "character index must be at most {max}")
            }
        }
    }
}

impl std::error::Error for CharacterValidationError {}

/// Highest character slot a user may occupy.
pub const CHARACTER_INDEX_MAX: u16 = 7;

/// Per-user character slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct CharacterIndex(u16);

impl CharacterIndex {
    /// Validate and construct a [`CharacterIndex`].
    pub const fn new(index: u16) -> Result<Self, CharacterValidationError> {
        if index > CHARACTER_INDEX_MAX {
            return Err(CharacterValidationError::IndexOutOfRange {
                max: CHARACTER_INDEX_MAX,
            });
        }
        Ok(Self(index))
    }

    /// Slot number.
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for CharacterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CharacterIndex> for u16 {
    fn from(value: CharacterIndex) -> Self {
        value.0
    }
}

impl TryFrom<u16> for CharacterIndex {
    type Error = CharacterValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A per-user narrative companion.
///
/// ## Invariants
/// - The (user, index) pair is unique per character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    id: Uuid,
    user_id: UserId,
    index: CharacterIndex,
    name: String,
    created_at: DateTime<Utc>,
}

/// Validated payload for creating a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDraft {
    /// Slot the character occupies.
    pub index: CharacterIndex,
    /// Display name, trimmed.
    pub name: String,
}

impl CharacterDraft {
    /// Validate raw character fields into a draft.
    pub fn new(index: u16, name: &str) -> Result<Self, CharacterValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CharacterValidationError::EmptyName);
        }
        Ok(Self {
            index: CharacterIndex::new(index)?,
            name: name.to_owned(),
        })
    }
}

/// Partial update applied to an existing character, addressed by slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterUpdate {
    /// Replacement name, if any.
    pub name: Option<String>,
}

impl CharacterUpdate {
    /// Validate a partial update payload.
    pub fn new(name: Option<&str>) -> Result<Self, CharacterValidationError> {
        let name = match name {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(CharacterValidationError::EmptyName);
                }
                Some(trimmed.to_owned())
            }
            None => None,
        };
        Ok(Self { name })
    }
}

impl Character {
    /// Build a [`Character`] from validated components.
    pub fn new(
        id: Uuid,
        user_id: UserId,
        draft: CharacterDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        let CharacterDraft { index, name } = draft;
        Self {
            id,
            user_id,
            index,
            name,
            created_at,
        }
    }

    /// Stable character identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user.
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Per-user slot.
    pub const fn index(&self) -> CharacterIndex {
        self.index
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Record creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
