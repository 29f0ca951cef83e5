//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use jw_shared::errors::{error_codes, ConfigError, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DomainError {
    /// The token error behind this domain error, if any
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Token(err) => err.to_error_response(),
            // Configuration details stay in the logs
            DomainError::Config(_) => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
        }
    }

    fn status_code(&self) -> u16 {
        match self {
            DomainError::Token(err) => err.status_code(),
            DomainError::Config(_) => 500,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
