//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Access and refresh token issuance (HS256)
//! - Token validation (signature, expiration, issuer, audience)
//! - Access token refresh from a refresh token

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
