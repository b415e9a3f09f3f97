//! Port abstraction for path persistence adapters and their errors.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Character, CharacterDraft, Path, PathName, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by path repository adapters.
    pub enum PathPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "path repository connection failed: {message}",
        /// Another path already owns this name.
        DuplicateName { name: String } => "path name {name} is already taken",
        /// The creator already has a character in the requested slot.
        DuplicateCharacterSlot { index: u16 } => "character slot {index} is already occupied",
        /// A referenced path does not exist.
        MissingPath { id: Uuid } => "path {id} does not exist",
        /// Query or mutation failed during execution.
        Query { message: String } => "path repository query failed: {message}",
    }
}

/// Storage operations for paths and path memberships.
#[async_trait]
pub trait PathRepository: Send + Sync {
    /// List every path in insertion order.
    async fn list(&self) -> Result<Vec<Path>, PathPersistenceError>;

    /// Fetch a path by its unique name.
    async fn find_by_name(&self, name: &PathName)
    -> Result<Option<Path>, PathPersistenceError>;

    /// Create a path together with the creator's initial character.
    ///
    /// Both rows are written in one transaction: if the character insert
    /// fails, the path must not persist.
    async fn create_with_character(
        &self,
        name: PathName,
        creator: &UserId,
        character: CharacterDraft,
    ) -> Result<(Path, Character), PathPersistenceError>;

    /// List the paths a user has joined, in join order.
    async fn paths_for_user(&self, user: &UserId) -> Result<Vec<Path>, PathPersistenceError>;

    /// Enrol a user in each listed path, skipping pairs that already exist.
    ///
    /// Returns the number of paths the user is now a member of among `ids`.
    /// An unknown path id fails with [`PathPersistenceError::MissingPath`].
    async fn add_memberships(
        &self,
        user: &UserId,
        ids: &[Uuid],
    ) -> Result<usize, PathPersistenceError>;
}
