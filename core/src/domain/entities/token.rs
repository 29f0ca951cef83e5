//! Token entities for JWT-based authentication.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::identity::{Identity, JwtPayload};
use crate::errors::TokenError;

/// Token type advertised to clients alongside a token pair
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Decoded claim set as a generic key-value mapping
pub type ClaimMap = serde_json::Map<String, serde_json::Value>;

/// Which lifetime a token is issued with.
///
/// Not written into the token: access and refresh tokens differ only by `exp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// User identifier
    pub id: i64,

    /// User email
    pub email: String,
}

impl Claims {
    /// Creates claims for `payload`, valid for `lifetime_seconds` from `issued_at`
    ///
    /// Fails with `TokenGenerationFailed` when the expiration timestamp does
    /// not fit in an `i64`.
    pub fn new<P: JwtPayload + ?Sized>(
        payload: &P,
        issued_at: i64,
        lifetime_seconds: i64,
        issuer: &str,
        audience: &str,
    ) -> Result<Self, TokenError> {
        let exp = issued_at
            .checked_add(lifetime_seconds)
            .ok_or_else(|| TokenError::TokenGenerationFailed {
                reason: format!("lifetime {lifetime_seconds}s overflows exp"),
            })?;

        Ok(Self {
            iat: issued_at,
            exp,
            iss: issuer.to_string(),
            aud: audience.to_string(),
            id: payload.id(),
            email: payload.email().to_string(),
        })
    }

    /// Seconds between issuance and expiration
    pub fn lifetime(&self) -> i64 {
        self.exp - self.iat
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The identity these claims were issued for
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.email.clone())
    }
}

/// Access and refresh token issued together for one identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,

    /// Always "Bearer"
    pub token_type: String,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_from_payload() {
        let identity = Identity::new(12, "grace@example.com");
        let claims = Claims::new(&identity, 1_700_000_000, 900, "issuer", "audience").unwrap();

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_900);
        assert_eq!(claims.lifetime(), 900);
        assert_eq!(claims.iss, "issuer");
        assert_eq!(claims.aud, "audience");
        assert_eq!(claims.identity(), identity);
    }

    #[test]
    fn test_claims_serialized_field_names() {
        let claims = Claims::new(&Identity::new(1, "a@b.c"), 10, 5, "iss", "aud").unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["iat"], 10);
        assert_eq!(json["exp"], 15);
        assert_eq!(json["iss"], "iss");
        assert_eq!(json["aud"], "aud");
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "a@b.c");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_claims_expiry() {
        let now = Utc::now().timestamp();
        let identity = Identity::new(1, "a@b.c");

        assert!(Claims::new(&identity, now, -1, "i", "a").unwrap().is_expired());
        assert!(!Claims::new(&identity, now, 3600, "i", "a").unwrap().is_expired());
    }

    #[test]
    fn test_claims_reject_overflowing_lifetime() {
        let identity = Identity::new(1, "a@b.c");
        let result = Claims::new(&identity, Utc::now().timestamp(), i64::MAX, "i", "a");

        assert!(matches!(
            result,
            Err(TokenError::TokenGenerationFailed { .. })
        ));
    }

    #[test]
    fn test_token_pair_type() {
        let pair = TokenPair::new("a".into(), "r".into(), 900, 604800);
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.refresh_expires_in, 604800);
    }
}
