//! Authentication service: login and bearer-token resolution.
//!
//! Login failures are deliberately indistinguishable: an unknown email and a
//! wrong password both produce the same `unauthorized` error so the endpoint
//! cannot be used to probe which addresses are registered.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, TokenError, TokenService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{AccessToken, DomainError, DomainResult, LoginCredentials, User};

/// Service issuing and resolving access tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

fn map_persistence_error(error: UserPersistenceError) -> DomainError {
    match error {
        UserPersistenceError::Connection { message } => DomainError::service_unavailable(message),
        UserPersistenceError::DuplicateEmail { .. } | UserPersistenceError::Query { .. } => {
            DomainError::internal(error.to_string())
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> DomainError {
    let PasswordHashError::Hash { message } = error;
    DomainError::internal(format!("password verification failed: {message}"))
}

fn invalid_credentials() -> DomainError {
    DomainError::unauthorized("invalid email or password")
}

impl AuthService {
    /// Create a new service with the given collaborators.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Verify credentials and issue an access token.
    pub async fn login(&self, credentials: &LoginCredentials) -> DomainResult<AccessToken> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(invalid_credentials)?;

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user = %user.id(), "password mismatch at login");
            return Err(invalid_credentials());
        }

        self.tokens
            .issue(user.id())
            .await
            .map_err(|err| DomainError::internal(format!("token issuance failed: {err}")))
    }

    /// Resolve a presented bearer token to a live user.
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let user_id = self.tokens.verify(token).await.map_err(|err| match err {
            TokenError::Expired => DomainError::unauthorized("token has expired"),
            TokenError::Invalid | TokenError::Issue { .. } => {
                DomainError::unauthorized("token is invalid")
            }
        })?;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::unauthorized("token subject no longer exists"))
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
    use crate::domain::{EmailAddress, ErrorCode, UserDraft, UserId};

    struct StubHasher;

    impl PasswordHasher for StubHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    #[derive(Default)]
    struct StubUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl StubUserRepository {
        fn with_user(email: &str, password: &str) -> (Self, UserId) {
            let draft = UserDraft::new("Ada", "Lovelace", email, format!("hashed:{password}"))
                .expect("valid draft");
            let user = User::new(UserId::random(), draft, Utc::now());
            let id = *user.id();
            (
                Self {
                    users: Mutex::new(vec![user]),
                },
                id,
            )
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

    /// Token service that accepts exactly the tokens it issued.
    #[derive(Default)]
    struct StubTokenService {
        issued: Mutex<Vec<(String, UserId)>>,
    }

    #[async_trait]
    impl TokenService for StubTokenService {
        async fn issue(&self, user: &UserId) -> Result<AccessToken, TokenError> {
            let token = format!("token-{user}");
            self.issued
                .lock()
                .expect("state lock")
                .push((token.clone(), *user));
            Ok(AccessToken::new(token))
        }

        async fn verify(&self, token: &str) -> Result<UserId, TokenError> {
            self.issued
                .lock()
                .expect("state lock")
                .iter()
                .find(|(issued, _)| issued == token)
                .map(|(_, user)| *user)
                .ok_or_else(TokenError::invalid)
        }
    }

    fn service(users: StubUserRepository) -> AuthService {
        AuthService::new(
            Arc::new(users),
            Arc::new(StubHasher),
            Arc::new(StubTokenService::default()),
        )
    }

    #[rstest]
    #[actix_rt::test]
    async fn login_round_trips_through_authenticate() {
        let (users, id) = StubUserRepository::with_user("ada@example.com", "correct horse");
        let svc = service(users);
        let creds = LoginCredentials::try_from_parts("ada@example.com", "correct horse")
            .expect("valid creds");
        let token = svc.login(&creds).await.expect("login succeeds");
        let user = svc
            .authenticate(token.as_str())
            .await
            .expect("token resolves");
        assert_eq!(user.id(), &id);
    }

    #[rstest]
    #[case("ada@example.com", "wrong password")]
    #[case("unknown@example.com", "correct horse")]
    #[actix_rt::test]
    async fn bad_credentials_are_indistinguishable(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let (users, _) = StubUserRepository::with_user("ada@example.com", "correct horse");
        let svc = service(users);
        let creds = LoginCredentials::try_from_parts(email, password).expect("valid shape");
        let err = svc.login(&creds).await.expect_err("login must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid email or password");
    }

    #[rstest]
    #[actix_rt::test]
    async fn unknown_tokens_are_unauthorized() {
        let (users, _) = StubUserRepository::with_user("ada@example.com", "correct horse");
        let svc = service(users);
        let err = svc
            .authenticate("forged")
            .await
            .expect_err("forged token must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
