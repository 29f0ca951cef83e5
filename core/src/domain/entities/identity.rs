//! Identity payload consumed by token issuance.

use serde::{Deserialize, Serialize};

use super::token::ClaimMap;
use crate::errors::TokenError;

/// Anything that can be turned into token claims: a numeric id and an email.
///
/// Implement this on your own user record to issue tokens for it directly.
pub trait JwtPayload {
    fn id(&self) -> i64;
    fn email(&self) -> &str;
}

/// Plain identity record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
}

impl Identity {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// Rebuild an identity from decoded token claims
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - When `id` is an integer and `email` a string
    /// * `Err(TokenError::MissingClaim)` - Otherwise
    pub fn from_claim_map(claims: &ClaimMap) -> Result<Self, TokenError> {
        let id = claims
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| TokenError::MissingClaim {
                claim: "id".to_string(),
            })?;
        let email = claims
            .get("email")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| TokenError::MissingClaim {
                claim: "email".to_string(),
            })?;

        Ok(Self::new(id, email))
    }
}

impl JwtPayload for Identity {
    fn id(&self) -> i64 {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }
}

/// Both fields must be truthy: a zero id or an empty email is rejected.
pub(crate) fn ensure_issuable<P: JwtPayload + ?Sized>(payload: &P) -> Result<(), TokenError> {
    if payload.id() == 0 {
        return Err(TokenError::InvalidPayload {
            field: "id".to_string(),
        });
    }
    if payload.email().is_empty() {
        return Err(TokenError::InvalidPayload {
            field: "email".to_string(),
        });
    }
    Ok(())
}
