//! The single GraphQL transport endpoint.
//!
//! Accepts `{query, variables}` JSON bodies on POST `/graphql` and returns
//! `{data, errors}`. Identity resolution happens before execution: a present
//! but invalid bearer credential fails the whole request with an
//! unauthorized entry in `errors` and no `data`.

use actix_web::{HttpRequest, post, web};
use async_graphql::Response;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use tracing::debug;

use crate::domain::AuthService;
use crate::inbound::graphql::{AppSchema, error::to_server_error};

use super::bearer::resolve_identity;

/// Execute a GraphQL request against the schema.
#[post("/graphql")]
pub async fn graphql(
    schema: web::Data<AppSchema>,
    auth: web::Data<AuthService>,
    http_req: HttpRequest,
    gql_req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = gql_req.into_inner();

    match resolve_identity(&http_req, &auth).await {
        Ok(Some(identity)) => {
            request = request.data(identity);
        }
        Ok(None) => {}
        Err(err) => {
            debug!(code = ?err.code(), "request-level authentication failure");
            return Response::from_errors(vec![to_server_error(err)]).into();
        }
    }

    schema.execute(request).await.into()
}
