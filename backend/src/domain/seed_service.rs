//! Storage reset and sample-data seeding.
//!
//! Used by the bootstrap path (opt-in via configuration) and by the test
//! harness to guarantee isolation between runs. Seeding goes through the
//! same repositories as request handling, so seeded rows satisfy every
//! entity invariant.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{
    ConceptRepository, ModuleRepository, PasswordHasher, PathRepository, StorageLifecycle,
    UserRepository,
};
use crate::domain::{
    CharacterDraft, ConceptDraft, DomainError, DomainResult, ModuleDraft, User, UserDraft,
};

/// Password every seeded account logs in with.
pub const SEED_PASSWORD: &str = "correct horse battery staple";

/// Seeded accounts, (first, last, email).
const SEED_USERS: [(&str, &str, &str); 2] = [
    ("Ada", "Lovelace", "ada@example.com"),
    ("Grace", "Hopper", "grace@example.com"),
];

const SEED_CONCEPTS: [(&str, &str); 3] = [
    ("variables", "Naming and binding values."),
    ("closures", "Functions capturing their scope."),
    ("recursion", "Functions calling themselves."),
];

/// Service resetting and seeding the backing store.
#[derive(Clone)]
pub struct SeedService {
    lifecycle: Arc<dyn StorageLifecycle>,
    users: Arc<dyn UserRepository>,
    paths: Arc<dyn PathRepository>,
    modules: Arc<dyn ModuleRepository>,
    concepts: Arc<dyn ConceptRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SeedService {
    /// Create a new service with the given collaborators.
    pub fn new(
        lifecycle: Arc<dyn StorageLifecycle>,
        users: Arc<dyn UserRepository>,
        paths: Arc<dyn PathRepository>,
        modules: Arc<dyn ModuleRepository>,
        concepts: Arc<dyn ConceptRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            lifecycle,
            users,
            paths,
            modules,
            concepts,
            hasher,
        }
    }

    /// Remove every row from the backing store.
    pub async fn reset(&self) -> DomainResult<()> {
        self.lifecycle
            .reset_all()
            .await
            .map_err(|err| DomainError::internal(format!("storage reset failed: {err}")))
    }

    /// Reset the store and seed sample users, paths, modules, and concepts.
    ///
    /// Returns the seeded users so callers (the test harness in particular)
    /// can log in as them with [`SEED_PASSWORD`].
    pub async fn reset_and_seed(&self) -> DomainResult<Vec<User>> {
        self.reset().await?;

        let password_hash = self
            .hasher
            .hash(SEED_PASSWORD)
            .map_err(|err| DomainError::internal(format!("seed hashing failed: {err}")))?;

        let mut seeded = Vec::with_capacity(SEED_USERS.len());
        for (first, last, email) in SEED_USERS {
            let draft = UserDraft::new(first, last, email, password_hash.clone())
                .map_err(|err| DomainError::internal(format!("seed user invalid: {err}")))?;
            let user = self
                .users
                .insert(draft)
                .await
                .map_err(|err| DomainError::internal(format!("seed user failed: {err}")))?;
            seeded.push(user);
        }

        let creator = seeded
            .first()
            .ok_or_else(|| DomainError::internal("no seed users configured"))?;
        let character = CharacterDraft::new(0, "ellie")
            .map_err(|err| DomainError::internal(format!("seed character invalid: {err}")))?;
        let (path, _) = self
            .paths
            .create_with_character(
                crate::domain::PathName::new("intro-js")
                    .map_err(|err| DomainError::internal(format!("seed path invalid: {err}")))?,
                creator.id(),
                character,
            )
            .await
            .map_err(|err| DomainError::internal(format!("seed path failed: {err}")))?;

        for (title, content) in [
            ("Hello world", "Your first program."),
            ("Variables", "let and const."),
        ] {
            let draft = ModuleDraft::new(title, content, path.id())
                .map_err(|err| DomainError::internal(format!("seed module invalid: {err}")))?;
            self.modules
                .insert(draft)
                .await
                .map_err(|err| DomainError::internal(format!("seed module failed: {err}")))?;
        }

        for (name, description) in SEED_CONCEPTS {
            let draft = ConceptDraft::new(name, description)
                .map_err(|err| DomainError::internal(format!("seed concept invalid: {err}")))?;
            self.concepts
                .insert(draft)
                .await
                .map_err(|err| DomainError::internal(format!("seed concept failed: {err}")))?;
        }

        info!(users = seeded.len(), "storage reset and seeded");
        Ok(seeded)
    }
}
