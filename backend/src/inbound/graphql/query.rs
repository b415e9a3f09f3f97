//! GraphQL query root.
//!
//! Every query is guarded: resolvers read the authenticated user from the
//! request context before delegating to exactly one service call.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::domain::{CharacterIndex, DomainError};

use super::ServiceContext;
use super::error::{GraphQLResultExt, to_graphql_error};
use super::guard::current_user;
use super::types::{
    CharacterObject, ConceptObject, FriendObject, ModuleObject, PathObject, PreferencesObject,
    UserObject,
};

/// Root of all GraphQL queries.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The authenticated user.
    async fn me(&self, ctx: &Context<'_>) -> Result<UserObject> {
        let user = current_user(ctx)?;
        Ok(user.user().clone().into())
    }

    /// Every path, in insertion order.
    async fn paths(&self, ctx: &Context<'_>) -> Result<Vec<PathObject>> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let paths = services.paths.list().await.into_graphql()?;
        Ok(paths.into_iter().map(Into::into).collect())
    }

    /// Look a path up by its unique name.
    async fn get_path_by_name(&self, ctx: &Context<'_>, name: String) -> Result<PathObject> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let path = services.paths.find_by_name(&name).await.into_graphql()?;
        Ok(path.into())
    }

    /// The paths the authenticated user has joined.
    async fn my_paths(&self, ctx: &Context<'_>) -> Result<Vec<PathObject>> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let paths = services
            .paths
            .my_paths(user.user().id())
            .await
            .into_graphql()?;
        Ok(paths.into_iter().map(Into::into).collect())
    }

    /// Every module, in insertion order.
    async fn modules(&self, ctx: &Context<'_>) -> Result<Vec<ModuleObject>> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let modules = services.modules.list().await.into_graphql()?;
        Ok(modules.into_iter().map(Into::into).collect())
    }

    /// The modules of one path, in insertion order.
    async fn path_modules(&self, ctx: &Context<'_>, path_id: Uuid) -> Result<Vec<ModuleObject>> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let modules = services
            .modules
            .list_by_path(path_id)
            .await
            .into_graphql()?;
        Ok(modules.into_iter().map(Into::into).collect())
    }

    /// Every friendship involving the given user.
    async fn get_user_friends(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
    ) -> Result<Vec<FriendObject>> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let friends = services
            .friends
            .friends_of(&crate::domain::UserId::from_uuid(user_id))
            .await
            .into_graphql()?;
        Ok(friends.into_iter().map(Into::into).collect())
    }

    /// The authenticated user's characters, ordered by slot.
    async fn characters(&self, ctx: &Context<'_>) -> Result<Vec<CharacterObject>> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let characters = services
            .characters
            .list_for(user.user().id())
            .await
            .into_graphql()?;
        Ok(characters.into_iter().map(Into::into).collect())
    }

    /// The authenticated user's character in the given slot.
    async fn get_character(&self, ctx: &Context<'_>, index: u16) -> Result<CharacterObject> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let index = CharacterIndex::new(index)
            .map_err(|err| to_graphql_error(DomainError::invalid_request(err.to_string())))?;
        let character = services
            .characters
            .get(user.user().id(), index)
            .await
            .into_graphql()?;
        Ok(character.into())
    }

    /// Every concept in the catalogue.
    async fn concepts(&self, ctx: &Context<'_>) -> Result<Vec<ConceptObject>> {
        current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let concepts = services.concepts.list().await.into_graphql()?;
        Ok(concepts.into_iter().map(Into::into).collect())
    }

    /// The concepts the authenticated user has learned.
    async fn my_concepts(&self, ctx: &Context<'_>) -> Result<Vec<ConceptObject>> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let concepts = services
            .concepts
            .learned_by(user.user().id())
            .await
            .into_graphql()?;
        Ok(concepts.into_iter().map(Into::into).collect())
    }

    /// The authenticated user's preference settings.
    async fn my_preferences(&self, ctx: &Context<'_>) -> Result<PreferencesObject> {
        let user = current_user(ctx)?;
        let services = ctx.data::<ServiceContext>()?;
        let preferences = services
            .preferences
            .get(user.user().id())
            .await
            .into_graphql()?;
        Ok(preferences.into())
    }
}
