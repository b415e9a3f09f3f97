//! Mapping from domain errors to GraphQL errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`DomainError`] into `async-graphql` errors here. Every error carries a
//! stable `code` extension and, when available, the request's trace id and
//! structured details.

use async_graphql::{Error, ErrorExtensions, ServerError, Value};

use crate::domain::{DomainError, DomainResult};
use crate::middleware::TraceId;

/// Convert a domain error into a resolver error with extensions.
pub fn to_graphql_error(error: DomainError) -> Error {
    Error::new(error.message().to_owned()).extend_with(|_, ext| {
        ext.set("code", error.code().as_str());
        if let Some(trace_id) = TraceId::current() {
            ext.set("traceId", trace_id.to_string());
        }
        if let Some(details) = error.details() {
            if let Ok(value) = Value::from_json(details.clone()) {
                ext.set("details", value);
            }
        }
    })
}

/// Convert a domain error into a request-level server error.
///
/// Used when the whole request fails before resolver execution starts
/// (e.g. an invalid bearer token), so the response carries `errors` and no
/// `data`.
pub fn to_server_error(error: DomainError) -> ServerError {
    let mut server = ServerError::new(error.message().to_owned(), None);
    let mut ext = async_graphql::ErrorExtensionValues::default();
    ext.set("code", Value::from(error.code().as_str()));
    if let Some(trace_id) = TraceId::current() {
        ext.set("traceId", Value::from(trace_id.to_string()));
    }
    server.extensions = Some(ext);
    server
}

/// Extension for domain results flowing into resolvers.
pub trait GraphQLResultExt<T> {
    /// Map the error side into a GraphQL error with extensions.
    fn into_graphql(self) -> Result<T, Error>;
}

impl<T> GraphQLResultExt<T> for DomainResult<T> {
    fn into_graphql(self) -> Result<T, Error> {
        self.map_err(to_graphql_error)
    }
}
