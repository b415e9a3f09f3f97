//! Port abstraction for access-token issuance and verification.

use async_trait::async_trait;

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing or verifying tokens.
    pub enum TokenError {
        /// Token could not be produced.
        Issue { message: String } => "token issuance failed: {message}",
        /// Token signature or shape is invalid.
        Invalid => "token is invalid",
        /// Token was valid once but has expired.
        Expired => "token has expired",
    }
}

/// Issues and verifies the bearer tokens carried on guarded requests.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issue a signed token for the given user.
    async fn issue(&self, user: &UserId) -> Result<AccessToken, TokenError>;

    /// Verify a presented token and extract its subject.
    async fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
