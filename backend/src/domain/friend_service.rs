//! Friend service: request, response, and listing workflow.
//!
//! The response state machine lives here: only a pending pair may be
//! answered, accept moves it to accepted, reject removes the record, and a
//! second response to the same pair is a conflict.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    FriendPersistenceError, FriendRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    DomainError, DomainResult, Friend, FriendDraft, FriendResponse, FriendStatus, UserId,
};

/// Service managing friendships.
#[derive(Clone)]
pub struct FriendService {
    friends: Arc<dyn FriendRepository>,
    users: Arc<dyn UserRepository>,
}

fn map_persistence_error(error: FriendPersistenceError) -> DomainError {
    match error {
        FriendPersistenceError::Connection { message } => {
            DomainError::service_unavailable(message)
        }
        FriendPersistenceError::DuplicatePair => {
            DomainError::conflict("friendship already exists between these users")
        }
        FriendPersistenceError::Query { message } => DomainError::internal(message),
    }
}

fn map_user_error(error: UserPersistenceError) -> DomainError {
    match error {
        UserPersistenceError::Connection { message } => DomainError::service_unavailable(message),
        UserPersistenceError::DuplicateEmail { .. } | UserPersistenceError::Query { .. } => {
            DomainError::internal(error.to_string())
        }
    }
}

impl FriendService {
    /// Create a new service with the given collaborators.
    pub fn new(friends: Arc<dyn FriendRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { friends, users }
    }

    /// Request a friendship; the record starts pending.
    pub async fn create(&self, requester: &UserId, receiver: &UserId) -> DomainResult<Friend> {
        let draft = FriendDraft::new(*requester, *receiver)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;

        self.users
            .find_by_id(receiver)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                DomainError::not_found("user does not exist")
                    .with_details(json!({ "userId": receiver.to_string() }))
            })?;

        self.friends
            .insert(draft)
            .await
            .map_err(map_persistence_error)
    }

    /// Answer a pending friend request with accept or reject.
    ///
    /// `response` is parsed against the enumerated set before storage is
    /// touched; any other value fails validation.
    pub async fn respond(
        &self,
        user1: &UserId,
        user2: &UserId,
        response: &str,
    ) -> DomainResult<Friend> {
        let response: FriendResponse = response
            .parse()
            .map_err(|err: crate::domain::FriendValidationError| {
                DomainError::invalid_request(err.to_string())
            })?;

        let friend = self
            .friends
            .find_pair(user1, user2)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found("no friend request between these users"))?;

        if friend.status() != FriendStatus::Pending {
            return Err(DomainError::conflict("friend request is already resolved"));
        }

        match response {
            FriendResponse::Accept => self
                .friends
                .set_status(friend.id(), FriendStatus::Accepted)
                .await
                .map_err(map_persistence_error)?
                .ok_or_else(|| DomainError::internal("friend record vanished mid-update")),
            FriendResponse::Reject => {
                let removed = self
                    .friends
                    .delete(friend.id())
                    .await
                    .map_err(map_persistence_error)?;
                if !removed {
                    return Err(DomainError::internal("friend record vanished mid-delete"));
                }
                info!(friend = %friend.id(), "friend request rejected");
                Ok(friend)
            }
        }
    }

    /// Delete a friendship record, failing with `not_found` on a miss.
    pub async fn delete(&self, friend_id: Uuid) -> DomainResult<bool> {
        let removed = self
            .friends
            .delete(friend_id)
            .await
            .map_err(map_persistence_error)?;
        if removed {
            Ok(true)
        } else {
            Err(DomainError::not_found("friendship does not exist")
                .with_details(json!({ "friendId": friend_id })))
        }
    }

    /// List every friendship involving the user, in request order.
    pub async fn friends_of(&self, user: &UserId) -> DomainResult<Vec<Friend>> {
        self.friends
            .friendships_of(user)
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{EmailAddress, ErrorCode, User, UserDraft};

    #[derive(Default)]
    struct StubFriendRepository {
        friends: Mutex<Vec<Friend>>,
    }

    #[async_trait]
    impl FriendRepository for StubFriendRepository {
        async fn insert(&self, draft: FriendDraft) -> Result<Friend, FriendPersistenceError> {
            let mut friends = self.friends.lock().expect("state lock");
            if friends
                .iter()
                .any(|friend| friend.links(&draft.user1_id, &draft.user2_id))
            {
                return Err(FriendPersistenceError::duplicate_pair());
            }
            let friend = Friend::new(
                Uuid::new_v4(),
                draft.user1_id,
                draft.user2_id,
                FriendStatus::Pending,
                Utc::now(),
            );
            friends.push(friend.clone());
            Ok(friend)
        }

        async fn find_pair(
            &self,
            user1: &UserId,
            user2: &UserId,
        ) -> Result<Option<Friend>, FriendPersistenceError> {
            Ok(self
                .friends
                .lock()
                .expect("state lock")
                .iter()
                .find(|friend| friend.links(user1, user2))
                .cloned())
        }

        async fn set_status(
            &self,
            id: Uuid,
            status: FriendStatus,
        ) -> Result<Option<Friend>, FriendPersistenceError> {
            let mut friends = self.friends.lock().expect("state lock");
            let Some(existing) = friends.iter_mut().find(|friend| friend.id() == id) else {
                return Ok(None);
            };
            *existing = Friend::new(
                existing.id(),
                *existing.user1_id(),
                *existing.user2_id(),
                status,
                existing.created_at(),
            );
            Ok(Some(existing.clone()))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, FriendPersistenceError> {
            let mut friends = self.friends.lock().expect("state lock");
            let before = friends.len();
            friends.retain(|friend| friend.id() != id);
            Ok(friends.len() < before)
        }

        async fn friendships_of(
            &self,
            user: &UserId,
        ) -> Result<Vec<Friend>, FriendPersistenceError> {
            Ok(self
                .friends
                .lock()
                .expect("state lock")
                .iter()
                .filter(|friend| friend.other_user(user).is_some())
                .cloned()
                .collect())
        }
    }

    struct StubUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl StubUserRepository {
        fn with_users(ids: &[UserId]) -> Self {
            let users = ids
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    let draft = UserDraft::new(
                        "User",
                        "Fixture",
                        &format!("user{i}@example.com"),
                        "$2b$fake",
                    )
                    .expect("valid draft");
                    User::new(*id, draft, Utc::now())
                })
                .collect();
            Self {
                users: Mutex::new(users),
            }
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(&self, draft: UserDraft) -> Result<User, UserPersistenceError> {
            let user = User::new(UserId::random(), draft, Utc::now());
            self.users.lock().expect("state lock").push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
            Ok(self
                .users
                .lock()
                .expect("state lock")
                .iter()
                .find(|user| user.id() == id)
                .cloned())
        }

        async fn find_by_email(
            &self,
            email: &EmailAddress,
        ) -> Result<Option<User>, UserPersistenceError> {
            Ok(self
                .users
                .lock()
                .expect("state lock")
                .iter()
                .find(|user| user.email() == email)
                .cloned())
        }
    }

    fn service_with_users(ids: &[UserId]) -> FriendService {
        FriendService::new(
            Arc::new(StubFriendRepository::default()),
            Arc::new(StubUserRepository::with_users(ids)),
        )
    }

    #[rstest]
    #[actix_rt::test]
    async fn accepting_a_request_lists_the_friend_once() {
        let a = UserId::random();
        let b = UserId::random();
        let svc = service_with_users(&[a, b]);

        svc.create(&a, &b).await.expect("request succeeds");
        let friend = svc.respond(&a, &b, "accept").await.expect("accept");
        assert_eq!(friend.status(), FriendStatus::Accepted);

        let friends = svc.friends_of(&a).await.expect("list succeeds");
        assert_eq!(friends.len(), 1);
        assert_eq!(
            friends.first().and_then(|f| f.other_user(&a)),
            Some(&b),
            "B appears exactly once"
        );
    }

    #[rstest]
    #[actix_rt::test]
    async fn responding_twice_is_a_conflict() {
        let a = UserId::random();
        let b = UserId::random();
        let svc = service_with_users(&[a, b]);

        svc.create(&a, &b).await.expect("request succeeds");
        svc.respond(&a, &b, "accept").await.expect("first response");
        let err = svc
            .respond(&a, &b, "accept")
            .await
            .expect_err("second response must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[actix_rt::test]
    async fn responses_outside_the_enum_fail_validation() {
        let a = UserId::random();
        let b = UserId::random();
        let svc = service_with_users(&[a, b]);

        svc.create(&a, &b).await.expect("request succeeds");
        let err = svc
            .respond(&a, &b, "maybe")
            .await
            .expect_err("unknown response must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[actix_rt::test]
    async fn rejecting_removes_the_record() {
        let a = UserId::random();
        let b = UserId::random();
        let svc = service_with_users(&[a, b]);

        svc.create(&a, &b).await.expect("request succeeds");
        svc.respond(&a, &b, "reject").await.expect("reject");
        let friends = svc.friends_of(&a).await.expect("list succeeds");
        assert!(friends.is_empty());
        // A fresh request is possible again afterwards.
        svc.create(&a, &b).await.expect("re-request succeeds");
    }

    #[rstest]
    #[actix_rt::test]
    async fn requesting_an_unknown_user_is_not_found() {
        let a = UserId::random();
        let svc = service_with_users(&[a]);
        let err = svc
            .create(&a, &UserId::random())
            .await
            .expect_err("unknown receiver must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_rt::test]
    async fn duplicate_requests_are_conflicts_in_either_orientation() {
        let a = UserId::random();
        let b = UserId::random();
        let svc = service_with_users(&[a, b]);

        svc.create(&a, &b).await.expect("request succeeds");
        let err = svc
            .create(&b, &a)
            .await
            .expect_err("mirrored request must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
