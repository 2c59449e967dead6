//! Identity-provider port.
//!
//! Credential handling and token issuance live in an external identity
//! service; the core only validates the signed bearer token it receives
//! and trusts the claims verbatim.

use uuid::Uuid;

/// Claims carried by a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    /// Display name, when the issuer embedded one.
    pub username: Option<String>,
    pub is_admin: bool,
    pub exp: i64,
}

/// Token service trait for bearer-token operations.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user. Used by tests and tooling; production
    /// tokens come from the identity provider.
    fn generate_token(
        &self,
        user_id: Uuid,
        username: Option<&str>,
        is_admin: bool,
    ) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
