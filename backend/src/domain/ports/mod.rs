//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod character_repository;
mod concept_repository;
mod friend_repository;
mod module_repository;
mod password_hasher;
mod path_repository;
mod preferences_repository;
mod storage_lifecycle;
mod token_service;
mod user_repository;

pub use character_repository::{CharacterPersistenceError, CharacterRepository};
pub use concept_repository::{ConceptPersistenceError, ConceptRepository};
pub use friend_repository::{FriendPersistenceError, FriendRepository};
pub use module_repository::{ModulePersistenceError, ModuleRepository};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use path_repository::{PathPersistenceError, PathRepository};
pub use preferences_repository::{PreferencesPersistenceError, PreferencesRepository};
pub use storage_lifecycle::{StorageLifecycle, StorageLifecycleError};
pub use token_service::{TokenError, TokenService};
pub use user_repository::{UserPersistenceError, UserRepository};
