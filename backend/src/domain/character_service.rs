//! Character service: slot-addressed lookups and updates.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{CharacterPersistenceError, CharacterRepository};
use crate::domain::{
    Character, CharacterDraft, CharacterIndex, CharacterUpdate, DomainError, DomainResult, UserId,
};

/// Service managing per-user characters.
#[derive(Clone)]
pub struct CharacterService {
    characters: Arc<dyn CharacterRepository>,
}

fn map_persistence_error(error: CharacterPersistenceError) -> DomainError {
    match error {
        CharacterPersistenceError::Connection { message } => {
            DomainError::service_unavailable(message)
        }
        CharacterPersistenceError::DuplicateIndex { index } => {
            DomainError::conflict("character slot is already occupied")
                .with_details(json!({ "index": index }))
        }
        CharacterPersistenceError::Query { message } => DomainError::internal(message),
    }
}

fn slot_not_found(index: CharacterIndex) -> DomainError {
    DomainError::not_found("no character in this slot")
        .with_details(json!({ "index": index.value() }))
}

impl CharacterService {
    /// Create a new service with the given repository.
    pub fn new(characters: Arc<dyn CharacterRepository>) -> Self {
        Self { characters }
    }

    /// List the user's characters ordered by slot.
    pub async fn list_for(&self, user: &UserId) -> DomainResult<Vec<Character>> {
        self.characters
            .list_for(user)
            .await
            .map_err(map_persistence_error)
    }

    /// Fetch the character in a slot, failing with `not_found` when empty.
    pub async fn get(&self, user: &UserId, index: CharacterIndex) -> DomainResult<Character> {
        self.characters
            .find_by_index(user, index)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| slot_not_found(index))
    }

    /// Create a character in a free slot.
    pub async fn create(&self, user: &UserId, draft: CharacterDraft) -> DomainResult<Character> {
        self.characters
            .insert(user, draft)
            .await
            .map_err(map_persistence_error)
    }

    /// Apply a partial update to the character in a slot.
    pub async fn update(
        &self,
        user: &UserId,
        index: CharacterIndex,
        update: CharacterUpdate,
    ) -> DomainResult<bool> {
        self.characters
            .update_by_index(user, index, update)
            .await
            .map_err(map_persistence_error)?
            .map(|_| true)
            .ok_or_else(|| slot_not_found(index))
    }
}
