//! Friend relationship data model.
//!
//! A friendship links two users. Records are created in the pending state and
//! transition only through an explicit response constrained to
//! {accept, reject}; any other value fails validation before reaching storage.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Validation errors returned by the friend constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriendValidationError {
    /// A user cannot befriend themselves.
    SelfFriendship,
    /// Response value was outside {accept, reject}.
    InvalidResponse {
        /// The rejected raw value.
        value: String,
    },
}

impl fmt::Display for FriendValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfFriendship => write!(f, "users cannot befriend themselves"),
            Self::InvalidResponse { value } => {
                write!(f, "friend response must be accept or reject, got {value:?}")
            }
        }
    }
}

impl std::error::Error for FriendValidationError {}

/// Lifecycle state of a friendship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendStatus {
    /// Requested but not yet answered.
    Pending,
    /// Confirmed by the receiving user.
    Accepted,
}

impl FriendStatus {
    /// Wire representation stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    /// Parse the stored representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }
}

/// Answer to a pending friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendResponse {
    /// Confirm the friendship.
    Accept,
    /// Decline and remove the request.
    Reject,
}

impl FromStr for FriendResponse {
    type Err = FriendValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(FriendValidationError::InvalidResponse {
                value: other.to_owned(),
            }),
        }
    }
}

/// A friendship between two users.
///
/// ## Invariants
/// - `user1_id` is the requesting user, `user2_id` the receiver; the pair is
///   unique regardless of orientation.
/// - Status starts at [`FriendStatus::Pending`] and only an explicit accept
///   moves it to [`FriendStatus::Accepted`]; a reject removes the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    id: Uuid,
    user1_id: UserId,
    user2_id: UserId,
    status: FriendStatus,
    created_at: DateTime<Utc>,
}

/// Validated payload for requesting a friendship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendDraft {
    /// Requesting user.
    pub user1_id: UserId,
    /// Receiving user.
    pub user2_id: UserId,
}

impl FriendDraft {
    /// Validate a friendship request between two users.
    pub fn new(user1_id: UserId, user2_id: UserId) -> Result<Self, FriendValidationError> {
        if user1_id == user2_id {
            return Err(FriendValidationError::SelfFriendship);
        }
        Ok(Self { user1_id, user2_id })
    }
}

impl Friend {
    /// Build a [`Friend`] from storage fields.
    pub const fn new(
        id: Uuid,
        user1_id: UserId,
        user2_id: UserId,
        status: FriendStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user1_id,
            user2_id,
            status,
            created_at,
        }
    }

    /// Stable record identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Requesting user.
    pub const fn user1_id(&self) -> &UserId {
        &self.user1_id
    }

    /// Receiving user.
    pub const fn user2_id(&self) -> &UserId {
        &self.user2_id
    }

    /// Lifecycle state.
    pub const fn status(&self) -> FriendStatus {
        self.status
    }

    /// Request creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The other side of the relationship, from `user`'s perspective.
    ///
    /// Returns `None` when `user` is not part of this friendship.
    pub fn other_user(&self, user: &UserId) -> Option<&UserId> {
        if &self.user1_id == user {
            Some(&self.user2_id)
        } else if &self.user2_id == user {
            Some(&self.user1_id)
        } else {
            None
        }
    }

    /// Whether this record links the given pair in either orientation.
    pub fn links(&self, a: &UserId, b: &UserId) -> bool {
        (&self.user1_id == a && &self.user2_id == b)
            || (&self.user1_id == b && &self.user2_id == a)
    }
}
