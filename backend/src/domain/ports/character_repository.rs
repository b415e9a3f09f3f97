//! Port abstraction for character persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Character, CharacterDraft, CharacterIndex, CharacterUpdate, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by character repository adapters.
    pub enum CharacterPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "character repository connection failed: {message}",
        /// The user already has a character in this slot.
        DuplicateIndex { index: u16 } => "character slot {index} is already occupied",
        /// Query or mutation failed during execution.
        Query { message: String } => "character repository query failed: {message}",
    }
}

/// Storage operations for per-user characters.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// List a user's characters ordered by slot.
    async fn list_for(&self, user: &UserId) -> Result<Vec<Character>, CharacterPersistenceError>;

    /// Fetch the character in a user's slot, if occupied.
    async fn find_by_index(
        &self,
        user: &UserId,
        index: CharacterIndex,
    ) -> Result<Option<Character>, CharacterPersistenceError>;

    /// Insert a new character, assigning id and creation timestamp.
    async fn insert(
        &self,
        user: &UserId,
        draft: CharacterDraft,
    ) -> Result<Character, CharacterPersistenceError>;

    /// Apply a partial update to the character in a slot; `None` when the
    /// slot is empty.
    async fn update_by_index(
        &self,
        user: &UserId,
        index: CharacterIndex,
        update: CharacterUpdate,
    ) -> Result<Option<Character>, CharacterPersistenceError>;
}
