//! Current-user accessor for guarded resolvers.
//!
//! The HTTP layer verifies the bearer token and attaches a [`CurrentUser`]
//! to the request's GraphQL data. Guarded resolvers call [`current_user`];
//! when no identity was attached the resolver fails with an unauthorized
//! error and no storage is touched.

use async_graphql::Context;

use crate::domain::{DomainError, User};

use super::error::to_graphql_error;

/// Authenticated identity attached to a request by the bearer middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// The authenticated user record.
    pub const fn user(&self) -> &User {
        &self.0
    }
}

/// Fetch the authenticated user or fail with `unauthorized`.
pub fn current_user<'ctx>(ctx: &Context<'ctx>) -> async_graphql::Result<&'ctx CurrentUser> {
    ctx.data_opt::<CurrentUser>().ok_or_else(|| {
        to_graphql_error(DomainError::unauthorized("authentication required"))
    })
}
