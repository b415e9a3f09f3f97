//! GraphQL object and input types.
//!
//! These are wire shapes only: conversions from domain types live here so
//! resolvers stay thin, and nothing sensitive (password hashes in
//! particular) is ever mapped onto an output type.

use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Character, Concept, Friend, FriendStatus, Module, Path, User, UserPreferences,
};

/// Public user record; the password hash never crosses this boundary.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    /// Stable identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email: user.email().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "LoginOutput")]
pub struct LoginOutput {
    /// Bearer token for subsequent guarded requests.
    pub access_token: String,
}

/// A named curriculum track.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Path")]
pub struct PathObject {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique, addressable name.
    pub name: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Path> for PathObject {
    fn from(path: Path) -> Self {
        Self {
            id: path.id(),
            name: path.name().as_str().to_owned(),
            created_at: path.created_at(),
        }
    }
}

/// A unit of learning content.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Module")]
pub struct ModuleObject {
    /// Stable identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Owning path.
    pub path_id: Uuid,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Module> for ModuleObject {
    fn from(module: Module) -> Self {
        Self {
            id: module.id(),
            title: module.title().to_owned(),
            content: module.content().to_owned(),
            path_id: module.path_id(),
            created_at: module.created_at(),
        }
    }
}

/// A skill or topic a user can mark as learned.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Concept")]
pub struct ConceptObject {
    /// Stable identifier.
    pub id: Uuid,
    /// Concept name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl From<Concept> for ConceptObject {
    fn from(concept: Concept) -> Self {
        Self {
            id: concept.id(),
            name: concept.name().to_owned(),
            description: concept.description().to_owned(),
        }
    }
}

/// A per-user narrative companion.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Character")]
pub struct CharacterObject {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Per-user slot index.
    pub index: u16,
    /// Display name.
    pub name: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Character> for CharacterObject {
    fn from(character: Character) -> Self {
        Self {
            id: character.id(),
            user_id: *character.user_id().as_uuid(),
            index: character.index().value(),
            name: character.name().to_owned(),
            created_at: character.created_at(),
        }
    }
}

/// Lifecycle state of a friendship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "FriendStatus", rename_items = "lowercase")]
pub enum FriendStatusValue {
    /// Requested but not yet answered.
    Pending,
    /// Confirmed by the receiving user.
    Accepted,
}

impl From<FriendStatus> for FriendStatusValue {
    fn from(status: FriendStatus) -> Self {
        match status {
            FriendStatus::Pending => Self::Pending,
            FriendStatus::Accepted => Self::Accepted,
        }
    }
}

/// A friendship between two users.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Friend")]
pub struct FriendObject {
    /// Stable record identifier.
    pub id: Uuid,
    /// Requesting user.
    pub user1_id: Uuid,
    /// Receiving user.
    pub user2_id: Uuid,
    /// Lifecycle state.
    pub status: FriendStatusValue,
    /// Request creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Friend> for FriendObject {
    fn from(friend: Friend) -> Self {
        Self {
            id: friend.id(),
            user1_id: *friend.user1_id().as_uuid(),
            user2_id: *friend.user2_id().as_uuid(),
            status: friend.status().into(),
            created_at: friend.created_at(),
        }
    }
}

/// Per-user preference settings.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "UserPreferences")]
pub struct PreferencesObject {
    /// Whether reminder emails are enabled.
    pub reminder_emails: bool,
    /// Whether the profile is visible to non-friends.
    pub public_profile: bool,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<UserPreferences> for PreferencesObject {
    fn from(preferences: UserPreferences) -> Self {
        Self {
            reminder_emails: preferences.reminder_emails(),
            public_profile: preferences.public_profile(),
            updated_at: preferences.updated_at(),
        }
    }
}

/// Signup payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "UserInput")]
pub struct UserInput {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email address.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

/// Path creation payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "PathInput")]
pub struct PathInput {
    /// Unique, addressable name.
    pub name: String,
}

/// Character creation payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CreateCharacterInput")]
pub struct CreateCharacterInput {
    /// Per-user slot index.
    pub index: u16,
    /// Display name.
    pub name: String,
}

/// Character partial-update payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "UpdateCharacterInput")]
pub struct UpdateCharacterInput {
    /// Replacement name, if any.
    pub name: Option<String>,
}

/// Module creation payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CreateModuleInput")]
pub struct CreateModuleInput {
    /// Display title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Owning path.
    pub path_id: Uuid,
}

/// Module partial-update payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "UpdateModuleInput")]
pub struct UpdateModuleInput {
    /// Module to update.
    pub id: Uuid,
    /// Replacement title, if any.
    pub title: Option<String>,
    /// Replacement content, if any.
    pub content: Option<String>,
}

/// Concept creation payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "ConceptInput")]
pub struct ConceptInput {
    /// Concept name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
}

/// Friendship request payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "CreateFriendInput")]
pub struct CreateFriendInput {
    /// Requesting user; must match the authenticated user.
    pub user1_id: Uuid,
    /// Receiving user.
    pub user2_id: Uuid,
}

/// Preferences partial-update payload.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "UserPreferencesInput")]
pub struct PreferencesInput {
    /// Replacement reminder-email setting, if any.
    pub reminder_emails: Option<bool>,
    /// Replacement profile-visibility setting, if any.
    pub public_profile: Option<bool>,
}
