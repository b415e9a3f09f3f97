//! Server construction and wiring.
//!
//! Builds the repository set, the domain services, the GraphQL schema, and
//! the actix application; `main` stays a thin bootstrap.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::web;
use chrono::Duration;

use backend::domain::ports::{
    CharacterRepository, ConceptRepository, FriendRepository, ModuleRepository, PasswordHasher,
    PathRepository, PreferencesRepository, StorageLifecycle, TokenService, UserRepository,
};
use backend::domain::{
    AuthService, CharacterService, ConceptService, FriendService, ModuleService, PathService,
    PreferencesService, SeedService, UserService,
};
use backend::inbound::graphql::{AppSchema, ServiceContext, build_schema};
use backend::inbound::http::{HealthState, graphql, live, ready};
use backend::outbound::auth::{BcryptPasswordHasher, JwtTokenService};
use backend::outbound::persistence::{
    DbPool, DieselCharacterRepository, DieselConceptRepository, DieselFriendRepository,
    DieselModuleRepository, DieselPathRepository, DieselPreferencesRepository,
    DieselStorageLifecycle, DieselUserRepository,
};

/// Every port implementation the services are wired from.
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Paths and memberships.
    pub paths: Arc<dyn PathRepository>,
    /// Modules and completions.
    pub modules: Arc<dyn ModuleRepository>,
    /// Concept catalogue.
    pub concepts: Arc<dyn ConceptRepository>,
    /// Per-user characters.
    pub characters: Arc<dyn CharacterRepository>,
    /// Friendships.
    pub friends: Arc<dyn FriendRepository>,
    /// Per-user preferences.
    pub preferences: Arc<dyn PreferencesRepository>,
    /// Destructive reset, used by the seeder.
    pub lifecycle: Arc<dyn StorageLifecycle>,
    /// Password hashing.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Token issuance and verification.
    pub tokens: Arc<dyn TokenService>,
}

/// Build the PostgreSQL-backed repository set.
pub fn postgres_repositories(pool: &DbPool, config: &AppConfig) -> Repositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        paths: Arc::new(DieselPathRepository::new(pool.clone())),
        modules: Arc::new(DieselModuleRepository::new(pool.clone())),
        concepts: Arc::new(DieselConceptRepository::new(pool.clone())),
        characters: Arc::new(DieselCharacterRepository::new(pool.clone())),
        friends: Arc::new(DieselFriendRepository::new(pool.clone())),
        preferences: Arc::new(DieselPreferencesRepository::new(pool.clone())),
        lifecycle: Arc::new(DieselStorageLifecycle::new(pool.clone())),
        hasher: Arc::new(BcryptPasswordHasher::new()),
        tokens: Arc::new(JwtTokenService::new(
            &config.token_secret,
            Duration::seconds(config.token_ttl_secs),
        )),
    }
}

/// Wire the domain services over a repository set.
pub fn wire_services(repos: &Repositories) -> (ServiceContext, SeedService) {
    let services = ServiceContext {
        users: UserService::new(repos.users.clone(), repos.hasher.clone()),
        auth: AuthService::new(
            repos.users.clone(),
            repos.hasher.clone(),
            repos.tokens.clone(),
        ),
        paths: PathService::new(repos.paths.clone()),
        modules: ModuleService::new(repos.modules.clone()),
        concepts: ConceptService::new(repos.concepts.clone()),
        characters: CharacterService::new(repos.characters.clone()),
        friends: FriendService::new(repos.friends.clone(), repos.users.clone()),
        preferences: PreferencesService::new(repos.preferences.clone()),
    };
    let seeder = SeedService::new(
        repos.lifecycle.clone(),
        repos.users.clone(),
        repos.paths.clone(),
        repos.modules.clone(),
        repos.concepts.clone(),
        repos.hasher.clone(),
    );
    (services, seeder)
}

/// Register the GraphQL endpoint and health probes.
///
/// Callers must have added the schema, the auth service, and the health
/// state as application data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(graphql).service(live).service(ready);
}

/// Build schema and app data from a repository set.
pub fn build_app_state(
    repos: &Repositories,
) -> (AppSchema, web::Data<AuthService>, SeedService) {
    let (services, seeder) = wire_services(repos);
    let auth = web::Data::new(services.auth.clone());
    let schema = build_schema(services);
    (schema, auth, seeder)
}

/// Shared health state handle.
pub fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}
