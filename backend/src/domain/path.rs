//! Learning path data model.
//!
//! A path is a named curriculum track composed of modules. Users enrol via
//! [`PathMembership`] join records; the pair (user, path) is unique.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Validation errors returned by the path constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeded [`PATH_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Name contained characters outside the allowed set.
    NameInvalidCharacters,
}

impl fmt::Display for PathValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "path name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "path name must be at most {max} characters")
            }
            Self::NameInvalidCharacters => write!(
                f,
                "path name may only contain letters, numbers, spaces, dashes, or underscores",
            ),
        }
    }
}

impl std::error::Error for PathValidationError {}

/// Maximum allowed length for a path name.
pub const PATH_NAME_MAX: usize = 64;

static PATH_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn path_name_regex() -> &'static Regex {
    PATH_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[A-Za-z0-9 _-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("path name regex failed to compile: {error}"))
    })
}

/// Unique, addressable name of a path (e.g. `intro-js`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathName(String);

impl PathName {
    /// Validate and construct a [`PathName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, PathValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PathValidationError::EmptyName);
        }
        if trimmed.chars().count() > PATH_NAME_MAX {
            return Err(PathValidationError::NameTooLong { max: PATH_NAME_MAX });
        }
        if !path_name_regex().is_match(trimmed) {
            return Err(PathValidationError::NameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PathName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PathName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PathName> for String {
    fn from(value: PathName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PathName {
    type Error = PathValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A named curriculum track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    id: Uuid,
    name: PathName,
    created_at: DateTime<Utc>,
}

impl Path {
    /// Build a [`Path`] from validated components.
    pub fn new(id: Uuid, name: PathName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    /// Stable path identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Unique, addressable name.
    pub const fn name(&self) -> &PathName {
        &self.name
    }

    /// Record creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Join record enrolling a user in a path.
///
/// ## Invariants
/// - The (user, path) pair is unique; duplicate joins are idempotent no-ops
///   at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMembership {
    id: Uuid,
    user_id: UserId,
    path_id: Uuid,
    joined_at: DateTime<Utc>,
}

impl PathMembership {
    /// Build a membership record from storage fields.
    pub const fn new(id: Uuid, user_id: UserId, path_id: Uuid, joined_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            path_id,
            joined_at,
        }
    }

    /// Join record identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Enrolled user.
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Path joined.
    pub const fn path_id(&self) -> Uuid {
        self.path_id
    }

    /// Enrolment timestamp.
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
