//! Bearer-token resolution for the GraphQL endpoint.
//!
//! Reads the `Authorization` header, verifies the token through the auth
//! service, and resolves the subject to a live user. A missing header yields
//! an anonymous request (guarded resolvers then fail individually); a
//! present but invalid credential fails the whole request.

use actix_web::HttpRequest;
use actix_web::http::header;

use crate::domain::{AuthService, DomainError, DomainResult};
use crate::inbound::graphql::CurrentUser;

/// Header scheme expected on guarded requests.
const BEARER_PREFIX: &str = "Bearer ";

/// Resolve the request's identity from its `Authorization` header.
///
/// Returns `Ok(None)` when no header is present, `Ok(Some(_))` for a valid
/// bearer credential, and an `unauthorized` error for anything else
/// (malformed scheme, invalid or expired token, unknown subject).
pub async fn resolve_identity(
    req: &HttpRequest,
    auth: &AuthService,
) -> DomainResult<Option<CurrentUser>> {
    let Some(raw) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let raw = raw
        .to_str()
        .map_err(|_| DomainError::unauthorized("authorization header is not valid ASCII"))?;

    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| DomainError::unauthorized("authorization scheme must be Bearer"))?
        .trim();
    if token.is_empty() {
        return Err(DomainError::unauthorized("bearer token is empty"));
    }

    let user = auth.authenticate(token).await?;
    Ok(Some(CurrentUser(user)))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::test::TestRequest;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::InMemoryStore;

    async fn auth_service() -> (AuthService, String) {
        let store = InMemoryStore::new();
        let services = store.services();
        services
            .users
            .create_user("Ada", "Lovelace", "ada@example.com", "correct horse")
            .await
            .expect("signup succeeds");
        let credentials =
            crate::domain::LoginCredentials::try_from_parts("ada@example.com", "correct horse")
                .expect("valid creds");
        let token = services.auth.login(&credentials).await.expect("login");
        (services.auth, token.into())
    }

    #[rstest]
    #[actix_rt::test]
    async fn missing_headers_are_anonymous() {
        let (auth, _) = auth_service().await;
        let req = TestRequest::default().to_http_request();
        let identity = resolve_identity(&req, &auth).await.expect("resolves");
        assert!(identity.is_none());
    }

    #[rstest]
    #[actix_rt::test]
    async fn valid_tokens_resolve_the_user() {
        let (auth, token) = auth_service().await;
        let req = TestRequest::default()
            .insert_header(("authorization", format!("Bearer {token}")))
            .to_http_request();
        let identity = resolve_identity(&req, &auth)
            .await
            .expect("resolves")
            .expect("authenticated");
        assert_eq!(identity.user().email().as_str(), "ada@example.com");
    }

    #[rstest]
    #[case::wrong_scheme("Basic abc123")]
    #[case::empty_token("Bearer ")]
    #[case::garbage_token("Bearer not.a.jwt")]
    #[actix_rt::test]
    async fn bad_credentials_fail_the_request(#[case] header_value: &str) {
        let (auth, _) = auth_service().await;
        let req = TestRequest::default()
            .insert_header(("authorization", header_value.to_owned()))
            .to_http_request();
        let err = resolve_identity(&req, &auth)
            .await
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
