//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the learning platform and
//! the services that enforce their invariants. Everything here is transport
//! agnostic; inbound adapters translate to GraphQL, outbound adapters to
//! PostgreSQL.

pub mod auth;
pub mod auth_service;
pub mod character;
pub mod character_service;
pub mod concept;
pub mod concept_service;
pub mod error;
pub mod friend;
pub mod friend_service;
pub mod module;
pub mod module_service;
pub mod path;
pub mod path_service;
pub mod ports;
pub mod preferences;
pub mod preferences_service;
pub mod seed_service;
pub mod user;
pub mod user_service;

pub use self::auth::{AccessToken, LoginCredentials, LoginValidationError, PASSWORD_MIN};
pub use self::auth_service::AuthService;
pub use self::character::{
    CHARACTER_INDEX_MAX, Character, CharacterDraft, CharacterIndex, CharacterUpdate,
    CharacterValidationError,
};
pub use self::character_service::CharacterService;
pub use self::concept::{Concept, ConceptDraft, ConceptValidationError, LearnedConcept};
pub use self::concept_service::ConceptService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::friend::{Friend, FriendDraft, FriendResponse, FriendStatus, FriendValidationError};
pub use self::friend_service::FriendService;
pub use self::module::{Module, ModuleCompletion, ModuleDraft, ModuleUpdate, ModuleValidationError};
pub use self::module_service::ModuleService;
pub use self::path::{PATH_NAME_MAX, Path, PathMembership, PathName, PathValidationError};
pub use self::path_service::PathService;
pub use self::preferences::{PreferencesUpdate, UserPreferences};
pub use self::preferences_service::PreferencesService;
pub use self::seed_service::{SEED_PASSWORD, SeedService};
pub use self::user::{EmailAddress, User, UserDraft, UserId, UserValidationError};
pub use self::user_service::UserService;

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, DomainError>;
