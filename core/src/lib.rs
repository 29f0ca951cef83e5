//! # JWT Core
//!
//! Token issuance and validation for an authentication flow.
//! This crate contains the claim and identity types, the stateless
//! [`TokenService`](services::TokenService), and its error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
