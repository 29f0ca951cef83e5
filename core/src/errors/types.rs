//! Token error types
//!
//! Payload errors are client-input errors raised before any signing happens.
//! Token errors are authentication failures and carry the verification
//! library's diagnostic behind a fixed `Invalid token:` prefix.

use jw_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid data provided for JWT generation: missing {field}")]
    InvalidPayload { field: String },

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String, expired: bool },

    #[error("Token generation failed: {reason}")]
    TokenGenerationFailed { reason: String },

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}

impl TokenError {
    pub(crate) fn invalid_token(reason: impl Into<String>) -> Self {
        TokenError::InvalidToken {
            reason: reason.into(),
            expired: false,
        }
    }

    /// The caller supplied an unusable identity payload
    pub fn is_client_error(&self) -> bool {
        matches!(self, TokenError::InvalidPayload { .. })
    }

    /// The presented token must be rejected
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidToken { .. } | TokenError::MissingClaim { .. }
        )
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::InvalidToken { expired: true, .. })
    }
}

impl IntoErrorResponse for TokenError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            TokenError::InvalidPayload { field } => {
                ErrorResponse::new(error_codes::BAD_REQUEST, self.to_string())
                    .add_detail("field", field)
            }
            TokenError::InvalidToken { expired: true, .. } => {
                ErrorResponse::new(error_codes::TOKEN_EXPIRED, self.to_string())
            }
            TokenError::InvalidToken { .. } => {
                ErrorResponse::new(error_codes::TOKEN_INVALID, self.to_string())
            }
            TokenError::MissingClaim { claim } => {
                ErrorResponse::new(error_codes::TOKEN_INVALID, self.to_string())
                    .add_detail("claim", claim)
            }
            TokenError::TokenGenerationFailed { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Token generation failed")
            }
        }
    }

    fn status_code(&self) -> u16 {
        match self {
            TokenError::InvalidPayload { .. } => 400,
            TokenError::InvalidToken { .. } | TokenError::MissingClaim { .. } => 401,
            TokenError::TokenGenerationFailed { .. } => 500,
        }
    }
}
