//! GraphQL mutation root.
//!
//! Mutations validate their input shape, perform exactly one logical
//! create/update/delete through a service, and return the resulting record
//! or a boolean outcome for deletes. `createUser` and `login` are the only
//! unguarded operations.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::domain::{
    CharacterDraft, CharacterIndex, CharacterUpdate, ConceptDraft, DomainError,
    LoginCredentials, ModuleDraft, ModuleUpdate, PreferencesUpdate, UserId,
};

use super::ServiceContext;
use super::error::{GraphQLResultExt, to_graphql_error};
use super::guard::current_user;
use super::types::{
    CharacterObject, ConceptInput, ConceptObject, CreateCharacterInput, CreateFriendInput,
    CreateModuleInput, FriendObject, LoginOutput, ModuleObject, PathInput, PathObject,
    PreferencesInput, PreferencesObject, UpdateCharacterInput, UpdateModuleInput, UserInput,
    UserObject,
};

fn invalid(err: impl std::fmt::Display) -> async_graphql::Error {
    to_graphql_error(DomainError::invalid_request(err.to_string()))
}

/// Root of all GraphQL mutations.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Register a new account. Unguarded.
    async fn create_user(&self, ctx: &Context<'_>, user: UserInput) -> Result<UserObject> {
        let services = ctx.data::<ServiceContext>()?;
        let created = services
            .users
            .create_user(&user.first_name, &user.last_name, &user.email, &user.password)
            .await
            .into_graphql()?;
        Ok(created.into())
    }

    /// Exchange credentials for an access token. Unguarded.
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<LoginOutput> {
        let services = ctx.data::<ServiceContext>()?;
        let credentials = LoginCredentials::try_from_parts(&email, &password).map_err(invalid)?;
        let token = services.auth.login(&credentials).await.into_graphql()?;
        Ok(LoginOutput {
            access_token: token.into(),
        })
    }

    /// Create a path and the creator's initial character atomically.
    async fn create_path(
        &self,
        ctx: &Context<'_>,
        path: PathInput,
        character: CreateCharacterInput,
    ) -> Result<PathObject> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let draft = CharacterDraft::new(character.index, &character.name).map_err(invalid)?;
        let (created, _) = services
            .paths
            .create(&path.name, user.user().id(), draft)
            .await
            .into_graphql()?;
        Ok(created.into())
    }

    /// Join a single path; true when the membership exists afterwards.
    async fn join_path(&self, ctx: &Context<'_>, path_id: Uuid) -> Result<bool> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        services
            .paths
            .join_paths(user.user().id(), &[path_id])
            .await
            .into_graphql()
    }

    /// Join many paths at once; true when at least one join succeeded.
    async fn join_paths(&self, ctx: &Context<'_>, paths: Vec<Uuid>) -> Result<bool> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        services
            .paths
            .join_paths(user.user().id(), &paths)
            .await
            .into_graphql()
    }

    /// Create a module under an existing path.
    async fn create_module(
        &self,
        ctx: &Context<'_>,
        module: CreateModuleInput,
    ) -> Result<ModuleObject> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let draft =
            ModuleDraft::new(&module.title, &module.content, module.path_id).map_err(invalid)?;
        let created = services.modules.create(draft).await.into_graphql()?;
        Ok(created.into())
    }

    /// Apply a partial update to a module.
    async fn update_module(
        &self,
        ctx: &Context<'_>,
        update: UpdateModuleInput,
    ) -> Result<ModuleObject> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let update = ModuleUpdate::new(update.id, update.title.as_deref(), update.content.as_deref())
            .map_err(invalid)?;
        let updated = services.modules.update(update).await.into_graphql()?;
        Ok(updated.into())
    }

    /// Delete a module.
    async fn delete_module(&self, ctx: &Context<'_>, module_id: Uuid) -> Result<bool> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        services.modules.delete(module_id).await.into_graphql()
    }

    /// Record a module completion for the authenticated user.
    async fn complete_module(&self, ctx: &Context<'_>, module_id: Uuid) -> Result<bool> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        services
            .modules
            .complete(user.user().id(), module_id)
            .await
            .into_graphql()
    }

    /// Request a friendship; the record starts pending.
    async fn create_friendship(
        &self,
        ctx: &Context<'_>,
        friend_input: CreateFriendInput,
    ) -> Result<FriendObject> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let requester = UserId::from_uuid(friend_input.user1_id);
        if &requester != user.user().id() {
            return Err(to_graphql_error(DomainError::forbidden(
                "friend requests can only be sent as yourself",
            )));
        }
        let receiver = UserId::from_uuid(friend_input.user2_id);
        let friend = services
            .friends
            .create(&requester, &receiver)
            .await
            .into_graphql()?;
        Ok(friend.into())
    }

    /// Answer a pending friend request with `accept` or `reject`.
    async fn respond_to_friend_request(
        &self,
        ctx: &Context<'_>,
        user1_id: Uuid,
        user2_id: Uuid,
        response: String,
    ) -> Result<FriendObject> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let friend = services
            .friends
            .respond(
                &UserId::from_uuid(user1_id),
                &UserId::from_uuid(user2_id),
                &response,
            )
            .await
            .into_graphql()?;
        Ok(friend.into())
    }

    /// Delete a friendship record.
    async fn delete_friendship(&self, ctx: &Context<'_>, friend_id: Uuid) -> Result<bool> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        services.friends.delete(friend_id).await.into_graphql()
    }

    /// Create a character in a free slot for the authenticated user.
    async fn create_character(
        &self,
        ctx: &Context<'_>,
        character: CreateCharacterInput,
    ) -> Result<CharacterObject> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let draft = CharacterDraft::new(character.index, &character.name).map_err(invalid)?;
        let created = services
            .characters
            .create(user.user().id(), draft)
            .await
            .into_graphql()?;
        Ok(created.into())
    }

    /// Apply a partial update to the character in the given slot.
    async fn update_character(
        &self,
        ctx: &Context<'_>,
        index: u16,
        update: UpdateCharacterInput,
    ) -> Result<bool> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let index = CharacterIndex::new(index).map_err(invalid)?;
        let update = CharacterUpdate::new(update.name.as_deref()).map_err(invalid)?;
        services
            .characters
            .update(user.user().id(), index, update)
            .await
            .into_graphql()
    }

    /// Add a concept to the catalogue.
    async fn create_concept(
        &self,
        ctx: &Context<'_>,
        concept: ConceptInput,
    ) -> Result<ConceptObject> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let draft = ConceptDraft::new(&concept.name, concept.description.as_deref().unwrap_or(""))
            .map_err(invalid)?;
        let created = services.concepts.create(draft).await.into_graphql()?;
        Ok(created.into())
    }

    /// Mark a concept learned for the authenticated user.
    async fn learn_concept(&self, ctx: &Context<'_>, concept_id: Uuid) -> Result<bool> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        services
            .concepts
            .learn(user.user().id(), concept_id)
            .await
            .into_graphql()
    }

    /// Apply a partial update to the authenticated user's preferences.
    async fn update_preferences(
        &self,
        ctx: &Context<'_>,
        preferences: PreferencesInput,
    ) -> Result<PreferencesObject> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let update = PreferencesUpdate {
            reminder_emails: preferences.reminder_emails,
            public_profile: preferences.public_profile,
        };
        let updated = services
            .preferences
            .update(user.user().id(), update)
            .await
            .into_graphql()?;
        Ok(updated.into())
    }
}
