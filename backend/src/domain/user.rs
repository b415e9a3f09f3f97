//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier was not a valid UUID.
    InvalidId,
    /// First name was missing or blank once trimmed.
    EmptyFirstName,
    /// Last name was missing or blank once trimmed.
    EmptyLastName,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email did not look like `local@domain.tld`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated email address used for login and uniqueness checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Intentionally permissive: one `@`, non-empty local part, dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// The address is trimmed and lowercased so uniqueness checks are
    /// case-insensitive.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = email.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&normalized) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    /// Borrow the underlying address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// The password hash travels with the record so the login service can verify
/// credentials; inbound adapters must never expose it.
///
/// ## Invariants
/// - `first_name` and `last_name` are non-empty once trimmed.
/// - `email` satisfies [`EmailAddress`] validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: EmailAddress,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Validated payload for creating a user; the id and timestamp are assigned
/// by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Given name, trimmed.
    pub first_name: String,
    /// Family name, trimmed.
    pub last_name: String,
    /// Normalised email address.
    pub email: EmailAddress,
    /// Bcrypt hash of the signup password.
    pub password_hash: String,
}

impl UserDraft {
    /// Validate raw signup fields into a draft.
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: EmailAddress::new(email)?,
            password_hash: password_hash.into(),
        })
    }
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, draft: UserDraft, created_at: DateTime<Utc>) -> Self {
        let UserDraft {
            first_name,
            last_name,
            email,
            password_hash,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
            password_hash,
            created_at,
        }
    }

    /// Stable user identifier.
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Login email address.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Bcrypt hash of the user's password.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Record creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", "ada@example.com")]
    #[case("  Ada@Example.COM  ", "ada@example.com")]
    fn emails_are_normalised(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_str(), expected);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("not-an-email", UserValidationError::InvalidEmail)]
    #[case("missing-tld@example", UserValidationError::InvalidEmail)]
    #[case("spaced name@example.com", UserValidationError::InvalidEmail)]
    fn invalid_emails_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
        let err = EmailAddress::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("", "Lovelace", UserValidationError::EmptyFirstName)]
    #[case("Ada", "  ", UserValidationError::EmptyLastName)]
    fn blank_names_are_rejected(
        #[case] first: &str,
        #[case] last: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = UserDraft::new(first, last, "ada@example.com", "$2b$fake")
            .expect_err("invalid names must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn drafts_trim_names() {
        let draft = UserDraft::new("  Ada ", " Lovelace ", "ada@example.com", "$2b$fake")
            .expect("valid draft");
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.last_name, "Lovelace");
    }

    #[rstest]
    fn user_ids_parse_uuids_only() {
        assert!(UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
        assert_eq!(
            UserId::new("not-a-uuid").expect_err("must fail"),
            UserValidationError::InvalidId
        );
    }
}
