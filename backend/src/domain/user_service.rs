//! User account service.
//!
//! Single choke point for account invariants: password strength, name and
//! email validation, and unique-email conflicts are all enforced here before
//! anything reaches storage.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{DomainError, DomainResult, PASSWORD_MIN, User, UserDraft, UserId};

/// Service managing user accounts.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

fn map_persistence_error(error: UserPersistenceError) -> DomainError {
    match error {
        UserPersistenceError::Connection { message } => DomainError::service_unavailable(message),
        UserPersistenceError::DuplicateEmail { email } => {
            DomainError::conflict("email is already registered")
                .with_details(json!({ "email": email }))
        }
        UserPersistenceError::Query { message } => DomainError::internal(message),
    }
}

fn map_hash_error(error: PasswordHashError) -> DomainError {
    let PasswordHashError::Hash { message } = error;
    DomainError::internal(format!("password hashing failed: {message}"))
}

impl UserService {
    /// Create a new service with the given collaborators.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Register a new account.
    ///
    /// The plaintext password never reaches the repository; it is hashed
    /// here and discarded.
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<User> {
        if password.chars().count() < PASSWORD_MIN {
            return Err(DomainError::invalid_request(format!(
                "password must be at least {PASSWORD_MIN} characters"
            )));
        }

        let password_hash = self.hasher.hash(password).map_err(map_hash_error)?;
        let draft = UserDraft::new(first_name, last_name, email, password_hash)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;

        self.users
            .insert(draft)
            .await
            .map_err(map_persistence_error)
    }

    /// Fetch an account by id, failing with `not_found` on a miss.
    pub async fn find_by_id(&self, id: &UserId) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found("user does not exist"))
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
    use crate::domain::{EmailAddress, ErrorCode};

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
        fail_duplicate: bool,
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(&self, draft: UserDraft) -> Result<User, UserPersistenceError> {
            if self.fail_duplicate {
                return Err(UserPersistenceError::duplicate_email(
                    draft.email.as_str(),
                ));
            }
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

    fn service(repo: StubUserRepository) -> UserService {
        UserService::new(Arc::new(repo), Arc::new(StubHasher))
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_user_hashes_the_password() {
        let svc = service(StubUserRepository::default());
        let user = svc
            .create_user("Ada", "Lovelace", "ada@example.com", "correct horse")
            .await
            .expect("signup succeeds");
        assert_eq!(user.password_hash(), "hashed:correct horse");
        assert_eq!(user.email().as_str(), "ada@example.com");
    }

    #[rstest]
    #[actix_rt::test]
    async fn short_passwords_fail_validation() {
        let svc = service(StubUserRepository::default());
        let err = svc
            .create_user("Ada", "Lovelace", "ada@example.com", "short")
            .await
            .expect_err("short password must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[actix_rt::test]
    async fn duplicate_emails_surface_as_conflict() {
        let svc = service(StubUserRepository {
            fail_duplicate: true,
            ..StubUserRepository::default()
        });
        let err = svc
            .create_user("Ada", "Lovelace", "ada@example.com", "correct horse")
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[actix_rt::test]
    async fn missing_users_surface_as_not_found() {
        let svc = service(StubUserRepository::default());
        let err = svc
            .find_by_id(&UserId::random())
            .await
            .expect_err("unknown id must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
