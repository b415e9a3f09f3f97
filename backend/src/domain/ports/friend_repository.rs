//! Port abstraction for friendship persistence adapters and their errors.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Friend, FriendDraft, FriendStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by friend repository adapters.
    pub enum FriendPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "friend repository connection failed: {message}",
        /// A friendship between these users already exists.
        DuplicatePair => "friendship already exists between these users",
        /// Query or mutation failed during execution.
        Query { message: String } => "friend repository query failed: {message}",
    }
}

/// Storage operations for friendships.
///
/// Pair lookups match either orientation of (user1, user2).
#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Insert a pending friendship request.
    async fn insert(&self, draft: FriendDraft) -> Result<Friend, FriendPersistenceError>;

    /// Fetch the friendship linking two users, regardless of orientation.
    async fn find_pair(
        &self,
        user1: &UserId,
        user2: &UserId,
    ) -> Result<Option<Friend>, FriendPersistenceError>;

    /// Replace the status of a friendship record.
    async fn set_status(
        &self,
        id: Uuid,
        status: FriendStatus,
    ) -> Result<Option<Friend>, FriendPersistenceError>;

    /// Delete a friendship record; `false` when it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, FriendPersistenceError>;

    /// List every friendship involving a user, in request order.
    async fn friendships_of(&self, user: &UserId) -> Result<Vec<Friend>, FriendPersistenceError>;
}
