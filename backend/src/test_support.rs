//! Test utilities for the backend crate.
//!
//! In-memory implementations of every repository port, sharing one store so
//! cross-aggregate operations (path creation writing a character, the
//! seeder's reset) behave like their SQL counterparts, including the
//! uniqueness constraints and idempotent `ON CONFLICT DO NOTHING` inserts.
//! Shared by unit tests in `src/` and the integration suites in `tests/`.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    CharacterPersistenceError, CharacterRepository, ConceptPersistenceError, ConceptRepository,
    FriendPersistenceError, FriendRepository, ModulePersistenceError, ModuleRepository,
    PathPersistenceError, PathRepository, PreferencesPersistenceError, PreferencesRepository,
    StorageLifecycle, StorageLifecycleError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthService, Character, CharacterDraft, CharacterIndex, CharacterService, CharacterUpdate,
    Concept, ConceptDraft, ConceptService, EmailAddress, Friend, FriendDraft, FriendService,
    FriendStatus, LearnedConcept, Module, ModuleCompletion, ModuleDraft, ModuleService,
    ModuleUpdate, Path, PathMembership, PathName, PathService, PreferencesService, SeedService,
    User, UserDraft, UserId, UserPreferences, UserService,
};
use crate::inbound::graphql::ServiceContext;
use crate::outbound::auth::{BcryptPasswordHasher, JwtTokenService};

/// Signing secret used by every in-memory token service.
pub const TEST_TOKEN_SECRET: &[u8] = b"test-token-secret";

/// Everything the in-memory adapters persist.
#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    paths: Vec<Path>,
    memberships: Vec<PathMembership>,
    modules: Vec<Module>,
    completions: Vec<ModuleCompletion>,
    concepts: Vec<Concept>,
    learned: Vec<LearnedConcept>,
    characters: Vec<Character>,
    friends: Vec<Friend>,
    preferences: Vec<UserPreferences>,
}

/// Shared in-memory store backing one adapter of each port.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("in-memory store lock")
    }

    /// Wire a full service context over this store.
    ///
    /// Bcrypt runs at a reduced cost factor and tokens are signed with
    /// [`TEST_TOKEN_SECRET`] so suites stay fast and deterministic.
    pub fn services(&self) -> ServiceContext {
        let users: Arc<dyn UserRepository> = Arc::new(self.clone());
        let paths: Arc<dyn PathRepository> = Arc::new(self.clone());
        let modules: Arc<dyn ModuleRepository> = Arc::new(self.clone());
        let concepts: Arc<dyn ConceptRepository> = Arc::new(self.clone());
        let characters: Arc<dyn CharacterRepository> = Arc::new(self.clone());
        let friends: Arc<dyn FriendRepository> = Arc::new(self.clone());
        let preferences: Arc<dyn PreferencesRepository> = Arc::new(self.clone());
        let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));
        let tokens = Arc::new(JwtTokenService::new(
            TEST_TOKEN_SECRET,
            Duration::minutes(30),
        ));

        ServiceContext {
            users: UserService::new(users.clone(), hasher.clone()),
            auth: AuthService::new(users.clone(), hasher.clone(), tokens),
            paths: PathService::new(paths),
            modules: ModuleService::new(modules),
            concepts: ConceptService::new(concepts),
            characters: CharacterService::new(characters),
            friends: FriendService::new(friends, users),
            preferences: PreferencesService::new(preferences),
        }
    }

    /// Wire a seed service over this store.
    pub fn seed_service(&self) -> SeedService {
        SeedService::new(
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(BcryptPasswordHasher::with_cost(4)),
        )
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, draft: UserDraft) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if state.users.iter().any(|user| user.email() == &draft.email) {
            return Err(UserPersistenceError::duplicate_email(draft.email.as_str()));
        }
        let user = User::new(UserId::random(), draft, Utc::now());
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl PathRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Path>, PathPersistenceError> {
        Ok(self.lock().paths.clone())
    }

    async fn find_by_name(
        &self,
        name: &PathName,
    ) -> Result<Option<Path>, PathPersistenceError> {
        Ok(self
            .lock()
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
        let mut state = self.lock();
        // All-or-nothing: every constraint is checked before any write.
        if state.paths.iter().any(|path| path.name() == &name) {
            return Err(PathPersistenceError::duplicate_name(name.as_str()));
        }
        if state
            .characters
            .iter()
            .any(|owned| owned.user_id() == creator && owned.index() == character.index)
        {
            return Err(PathPersistenceError::duplicate_character_slot(
                character.index.value(),
            ));
        }

        let now = Utc::now();
        let path = Path::new(Uuid::new_v4(), name, now);
        let created = Character::new(Uuid::new_v4(), *creator, character, now);
        state.paths.push(path.clone());
        state.characters.push(created.clone());
        state
            .memberships
            .push(PathMembership::new(Uuid::new_v4(), *creator, path.id(), now));
        Ok((path, created))
    }

    async fn paths_for_user(&self, user: &UserId) -> Result<Vec<Path>, PathPersistenceError> {
        let state = self.lock();
        Ok(state
            .memberships
            .iter()
            .filter(|membership| membership.user_id() == user)
            .filter_map(|membership| {
                state
                    .paths
                    .iter()
                    .find(|path| path.id() == membership.path_id())
                    .cloned()
            })
            .collect())
    }

    async fn add_memberships(
        &self,
        user: &UserId,
        ids: &[Uuid],
    ) -> Result<usize, PathPersistenceError> {
        let mut state = self.lock();
        for path_id in ids {
            if !state.paths.iter().any(|path| path.id() == *path_id) {
                return Err(PathPersistenceError::missing_path(*path_id));
            }
            let already_joined = state
                .memberships
                .iter()
                .any(|membership| {
                    membership.user_id() == user && membership.path_id() == *path_id
                });
            if !already_joined {
                state.memberships.push(PathMembership::new(
                    Uuid::new_v4(),
                    *user,
                    *path_id,
                    Utc::now(),
                ));
            }
        }
        Ok(ids.len())
    }
}

#[async_trait]
impl ModuleRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Module>, ModulePersistenceError> {
        Ok(self.lock().modules.clone())
    }

    async fn list_by_path(
        &self,
        path_id: Uuid,
    ) -> Result<Vec<Module>, ModulePersistenceError> {
        Ok(self
            .lock()
            .modules
            .iter()
            .filter(|module| module.path_id() == path_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: ModuleDraft) -> Result<Module, ModulePersistenceError> {
        let mut state = self.lock();
        if !state.paths.iter().any(|path| path.id() == draft.path_id) {
            return Err(ModulePersistenceError::missing_path(draft.path_id));
        }
        let module = Module::new(Uuid::new_v4(), draft, Utc::now());
        state.modules.push(module.clone());
        Ok(module)
    }

    async fn update(
        &self,
        update: ModuleUpdate,
    ) -> Result<Option<Module>, ModulePersistenceError> {
        let mut state = self.lock();
        let Some(existing) = state
            .modules
            .iter_mut()
            .find(|module| module.id() == update.id)
        else {
            return Ok(None);
        };
        let draft = ModuleDraft {
            title: update.title.unwrap_or_else(|| existing.title().to_owned()),
            content: update
                .content
                .unwrap_or_else(|| existing.content().to_owned()),
            path_id: existing.path_id(),
        };
        *existing = Module::new(existing.id(), draft, existing.created_at());
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ModulePersistenceError> {
        let mut state = self.lock();
        let before = state.modules.len();
        state.modules.retain(|module| module.id() != id);
        Ok(state.modules.len() < before)
    }

    async fn mark_completed(
        &self,
        user: &UserId,
        module_id: Uuid,
    ) -> Result<(), ModulePersistenceError> {
        let mut state = self.lock();
        if !state.modules.iter().any(|module| module.id() == module_id) {
            return Err(ModulePersistenceError::missing_module(module_id));
        }
        let already_recorded = state
            .completions
            .iter()
            .any(|completion| {
                completion.user_id() == user && completion.module_id() == module_id
            });
        if !already_recorded {
            state.completions.push(ModuleCompletion::new(
                Uuid::new_v4(),
                *user,
                module_id,
                Utc::now(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ConceptRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Concept>, ConceptPersistenceError> {
        Ok(self.lock().concepts.clone())
    }

    async fn insert(&self, draft: ConceptDraft) -> Result<Concept, ConceptPersistenceError> {
        let concept = Concept::new(Uuid::new_v4(), draft);
        self.lock().concepts.push(concept.clone());
        Ok(concept)
    }

    async fn mark_learned(
        &self,
        user: &UserId,
        concept_id: Uuid,
    ) -> Result<(), ConceptPersistenceError> {
        let mut state = self.lock();
        if !state
            .concepts
            .iter()
            .any(|concept| concept.id() == concept_id)
        {
            return Err(ConceptPersistenceError::missing_concept(concept_id));
        }
        let already_learned = state
            .learned
            .iter()
            .any(|learned| learned.user_id() == user && learned.concept_id() == concept_id);
        if !already_learned {
            state.learned.push(LearnedConcept::new(
                Uuid::new_v4(),
                *user,
                concept_id,
                Utc::now(),
            ));
        }
        Ok(())
    }

    async fn learned_by(&self, user: &UserId) -> Result<Vec<Concept>, ConceptPersistenceError> {
        let state = self.lock();
        Ok(state
            .learned
            .iter()
            .filter(|learned| learned.user_id() == user)
            .filter_map(|learned| {
                state
                    .concepts
                    .iter()
                    .find(|concept| concept.id() == learned.concept_id())
                    .cloned()
            })
            .collect())
    }
}

#[async_trait]
impl CharacterRepository for InMemoryStore {
    async fn list_for(
        &self,
        user: &UserId,
    ) -> Result<Vec<Character>, CharacterPersistenceError> {
        let mut owned: Vec<Character> = self
            .lock()
            .characters
            .iter()
            .filter(|character| character.user_id() == user)
            .cloned()
            .collect();
        owned.sort_by_key(Character::index);
        Ok(owned)
    }

    async fn find_by_index(
        &self,
        user: &UserId,
        index: CharacterIndex,
    ) -> Result<Option<Character>, CharacterPersistenceError> {
        Ok(self
            .lock()
            .characters
            .iter()
            .find(|character| character.user_id() == user && character.index() == index)
            .cloned())
    }

    async fn insert(
        &self,
        user: &UserId,
        draft: CharacterDraft,
    ) -> Result<Character, CharacterPersistenceError> {
        let mut state = self.lock();
        if state
            .characters
            .iter()
            .any(|character| character.user_id() == user && character.index() == draft.index)
        {
            return Err(CharacterPersistenceError::duplicate_index(
                draft.index.value(),
            ));
        }
        let character = Character::new(Uuid::new_v4(), *user, draft, Utc::now());
        state.characters.push(character.clone());
        Ok(character)
    }

    async fn update_by_index(
        &self,
        user: &UserId,
        index: CharacterIndex,
        update: CharacterUpdate,
    ) -> Result<Option<Character>, CharacterPersistenceError> {
        let mut state = self.lock();
        let Some(existing) = state
            .characters
            .iter_mut()
            .find(|character| character.user_id() == user && character.index() == index)
        else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            let draft = CharacterDraft {
                index: existing.index(),
                name,
            };
            *existing = Character::new(
                existing.id(),
                *existing.user_id(),
                draft,
                existing.created_at(),
            );
        }
        Ok(Some(existing.clone()))
    }
}

#[async_trait]
impl FriendRepository for InMemoryStore {
    async fn insert(&self, draft: FriendDraft) -> Result<Friend, FriendPersistenceError> {
        let mut state = self.lock();
        if state
            .friends
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
        state.friends.push(friend.clone());
        Ok(friend)
    }

    async fn find_pair(
        &self,
        user1: &UserId,
        user2: &UserId,
    ) -> Result<Option<Friend>, FriendPersistenceError> {
        Ok(self
            .lock()
            .friends
            .iter()
            .find(|friend| friend.links(user1, user2))
            .cloned())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: FriendStatus,
    ) -> Result<Option<Friend>, FriendPersistenceError> {
        let mut state = self.lock();
        let Some(existing) = state.friends.iter_mut().find(|friend| friend.id() == id)
        else {
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
        let mut state = self.lock();
        let before = state.friends.len();
        state.friends.retain(|friend| friend.id() != id);
        Ok(state.friends.len() < before)
    }

    async fn friendships_of(
        &self,
        user: &UserId,
    ) -> Result<Vec<Friend>, FriendPersistenceError> {
        Ok(self
            .lock()
            .friends
            .iter()
            .filter(|friend| friend.other_user(user).is_some())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryStore {
    async fn find(
        &self,
        user: &UserId,
    ) -> Result<Option<UserPreferences>, PreferencesPersistenceError> {
        Ok(self
            .lock()
            .preferences
            .iter()
            .find(|preferences| preferences.user_id() == user)
            .cloned())
    }

    async fn upsert(
        &self,
        preferences: &UserPreferences,
    ) -> Result<(), PreferencesPersistenceError> {
        let mut state = self.lock();
        if let Some(existing) = state
            .preferences
            .iter_mut()
            .find(|stored| stored.user_id() == preferences.user_id())
        {
            *existing = preferences.clone();
        } else {
            state.preferences.push(preferences.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl StorageLifecycle for InMemoryStore {
    async fn reset_all(&self) -> Result<(), StorageLifecycleError> {
        *self.lock() = StoreState::default();
        Ok(())
    }
}
