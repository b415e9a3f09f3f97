//! Path service: listing, lookup, creation, and enrolment.
//!
//! Creation bundles the creator's initial character; the repository performs
//! both writes in one transaction so a failed character insert leaves no
//! path behind. Validation therefore happens here, before the transaction
//! starts.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{PathPersistenceError, PathRepository};
use crate::domain::{
    Character, CharacterDraft, DomainError, DomainResult, Path, PathName, UserId,
};

/// Service managing paths and path membership.
#[derive(Clone)]
pub struct PathService {
    paths: Arc<dyn PathRepository>,
}

fn map_persistence_error(error: PathPersistenceError) -> DomainError {
    match error {
        PathPersistenceError::Connection { message } => DomainError::service_unavailable(message),
        PathPersistenceError::DuplicateName { name } => {
            DomainError::conflict("path name is already taken").with_details(json!({
                "name": name,
            }))
        }
        PathPersistenceError::DuplicateCharacterSlot { index } => {
            DomainError::conflict("character slot is already occupied").with_details(json!({
                "index": index,
            }))
        }
        PathPersistenceError::MissingPath { id } => {
            DomainError::not_found("path does not exist").with_details(json!({
                "pathId": id,
            }))
        }
        PathPersistenceError::Query { message } => DomainError::internal(message),
    }
}

impl PathService {
    /// Create a new service with the given repository.
    pub fn new(paths: Arc<dyn PathRepository>) -> Self {
        Self { paths }
    }

    /// List every path in insertion order.
    pub async fn list(&self) -> DomainResult<Vec<Path>> {
        self.paths.list().await.map_err(map_persistence_error)
    }

    /// Look a path up by its unique name, failing with `not_found` on a miss.
    pub async fn find_by_name(&self, name: &str) -> DomainResult<Path> {
        let name = PathName::new(name)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        self.paths
            .find_by_name(&name)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| {
                DomainError::not_found("path does not exist").with_details(json!({
                    "name": name.as_str(),
                }))
            })
    }

    /// Create a path and the creator's initial character atomically.
    pub async fn create(
        &self,
        name: &str,
        creator: &UserId,
        character: CharacterDraft,
    ) -> DomainResult<(Path, Character)> {
        let name = PathName::new(name)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;

        let created = self
            .paths
            .create_with_character(name, creator, character)
            .await
            .map_err(map_persistence_error)?;

        info!(path = %created.0.id(), user = %creator, "path created");
        Ok(created)
    }

    /// List the paths the user has joined, in join order.
    pub async fn my_paths(&self, user: &UserId) -> DomainResult<Vec<Path>> {
        self.paths
            .paths_for_user(user)
            .await
            .map_err(map_persistence_error)
    }

    /// Enrol the user in one or many paths.
    ///
    /// Joining an already-joined path is an idempotent no-op. Returns true
    /// when the user is a member of at least one of the given paths
    /// afterwards, so repeating a join reports success rather than failure.
    pub async fn join_paths(&self, user: &UserId, ids: &[Uuid]) -> DomainResult<bool> {
        if ids.is_empty() {
            return Ok(false);
        }
        let joined = self
            .paths
            .add_memberships(user, ids)
            .await
            .map_err(map_persistence_error)?;
        Ok(joined > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{CharacterValidationError, ErrorCode};

    #[derive(Default)]
    struct StubState {
        paths: Vec<Path>,
        memberships: HashSet<(UserId, Uuid)>,
        characters_created: usize,
    }

    #[derive(Default)]
    struct StubPathRepository {
        state: Mutex<StubState>,
        fail_character_insert: bool,
    }

    #[async_trait]
    impl PathRepository for StubPathRepository {
        async fn list(&self) -> Result<Vec<Path>, PathPersistenceError> {
            Ok(self.state.lock().expect("state lock").paths.clone())
        }

        async fn find_by_name(
            &self,
            name: &PathName,
        ) -> Result<Option<Path>, PathPersistenceError> {
            Ok(self
                .state
                .lock()
                .expect("state lock")
                .paths
                .iter()
                .find(|path| path.name() == name)
                .cloned())
        }

        async fn create_with_character(
            &self,
            name: PathName,
            creator: &UserId,
            character: CharacterDraft,
        ) -> Result<(Path, Character), PathPersistenceError> {
            // Transactional contract: nothing persists when the character
            // write fails.
            if self.fail_character_insert {
                return Err(PathPersistenceError::query("character insert failed"));
            }
            let mut state = self.state.lock().expect("state lock");
            if state.paths.iter().any(|path| path.name() == &name) {
                return Err(PathPersistenceError::duplicate_name(name.as_str()));
            }
            let path = Path::new(Uuid::new_v4(), name, Utc::now());
            let created = Character::new(Uuid::new_v4(), *creator, character, Utc::now());
            state.paths.push(path.clone());
            state.memberships.insert((*creator, path.id()));
            state.characters_created += 1;
            Ok((path, created))
        }

        async fn paths_for_user(
            &self,
            user: &UserId,
        ) -> Result<Vec<Path>, PathPersistenceError> {
            let state = self.state.lock().expect("state lock");
            Ok(state
                .paths
                .iter()
                .filter(|path| state.memberships.contains(&(*user, path.id())))
                .cloned()
                .collect())
        }

        async fn add_memberships(
            &self,
            user: &UserId,
            ids: &[Uuid],
        ) -> Result<usize, PathPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            let mut joined = 0;
            for id in ids {
                if !state.paths.iter().any(|path| path.id() == *id) {
                    return Err(PathPersistenceError::missing_path(*id));
                }
                state.memberships.insert((*user, *id));
                joined += 1;
            }
            Ok(joined)
        }
    }

    fn draft() -> CharacterDraft {
        CharacterDraft::new(0, "ellie").expect("valid draft")
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_enrols_the_creator() {
        let svc = PathService::new(Arc::new(StubPathRepository::default()));
        let user = UserId::random();
        let (path, character) = svc
            .create("intro-js", &user, draft())
            .await
            .expect("create succeeds");
        assert_eq!(path.name().as_str(), "intro-js");
        assert_eq!(character.user_id(), &user);
        let mine = svc.my_paths(&user).await.expect("list succeeds");
        assert_eq!(mine.len(), 1);
    }

    #[rstest]
    #[actix_rt::test]
    async fn duplicate_names_surface_as_conflict() {
        let svc = PathService::new(Arc::new(StubPathRepository::default()));
        let user = UserId::random();
        svc.create("intro-js", &user, draft())
            .await
            .expect("first create succeeds");
        let err = svc
            .create("intro-js", &user, draft())
            .await
            .expect_err("duplicate name must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[actix_rt::test]
    async fn failed_character_insert_leaves_no_path() {
        let repo = Arc::new(StubPathRepository {
            fail_character_insert: true,
            ..StubPathRepository::default()
        });
        let svc = PathService::new(repo.clone());
        let user = UserId::random();
        svc.create("intro-js", &user, draft())
            .await
            .expect_err("create must fail");
        assert!(repo.state.lock().expect("state lock").paths.is_empty());
        let err = svc
            .find_by_name("intro-js")
            .await
            .expect_err("path must be absent");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_rt::test]
    async fn joining_twice_is_idempotent_and_true() {
        let repo = Arc::new(StubPathRepository::default());
        let svc = PathService::new(repo.clone());
        let creator = UserId::random();
        let (path, _) = svc
            .create("intro-js", &creator, draft())
            .await
            .expect("create succeeds");

        let joiner = UserId::random();
        assert!(svc
            .join_paths(&joiner, &[path.id()])
            .await
            .expect("first join succeeds"));
        assert!(svc
            .join_paths(&joiner, &[path.id()])
            .await
            .expect("second join succeeds"));
        let memberships = &repo.state.lock().expect("state lock").memberships;
        assert_eq!(
            memberships
                .iter()
                .filter(|(user, _)| user == &joiner)
                .count(),
            1
        );
    }

    #[rstest]
    #[actix_rt::test]
    async fn joining_unknown_paths_is_not_found() {
        let svc = PathService::new(Arc::new(StubPathRepository::default()));
        let err = svc
            .join_paths(&UserId::random(), &[Uuid::new_v4()])
            .await
            .expect_err("unknown path must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_rt::test]
    async fn joining_nothing_is_false() {
        let svc = PathService::new(Arc::new(StubPathRepository::default()));
        let joined = svc
            .join_paths(&UserId::random(), &[])
            .await
            .expect("empty join succeeds");
        assert!(!joined);
    }

    #[rstest]
    fn invalid_character_payloads_fail_before_storage() {
        // Draft validation happens in the inbound layer; the service contract
        // relies on CharacterDraft rejecting blank names up front.
        let err = CharacterDraft::new(0, "   ").expect_err("blank name must fail");
        assert_eq!(err, CharacterValidationError::EmptyName);
    }
}
