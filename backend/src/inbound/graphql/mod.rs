//! GraphQL schema assembly.
//!
//! The schema owns a [`ServiceContext`] bundling every domain service;
//! per-request identity is attached separately by the HTTP layer so the
//! schema itself stays request-agnostic.

pub mod error;
pub mod guard;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

use crate::domain::{
    AuthService, CharacterService, ConceptService, FriendService, ModuleService, PathService,
    PreferencesService, UserService,
};

pub use guard::CurrentUser;
pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// Executable GraphQL schema.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Domain services shared with every resolver via schema data.
#[derive(Clone)]
pub struct ServiceContext {
    /// Account management.
    pub users: UserService,
    /// Login and token resolution.
    pub auth: AuthService,
    /// Paths and memberships.
    pub paths: PathService,
    /// Modules and completions.
    pub modules: ModuleService,
    /// Concept catalogue and learned records.
    pub concepts: ConceptService,
    /// Per-user characters.
    pub characters: CharacterService,
    /// Friendships.
    pub friends: FriendService,
    /// Per-user preferences.
    pub preferences: PreferencesService,
}

/// Build the executable schema over the given services.
pub fn build_schema(services: ServiceContext) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}
