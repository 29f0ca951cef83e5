//! Shared configuration, logging setup and error response types
//!
//! This crate provides functionality used by the token service:
//! - Configuration types loaded from the environment
//! - Tracing subscriber initialization
//! - Error types and response structures

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, JwtConfig, LogFormat, LoggingConfig};
pub use errors::{error_codes, ConfigError, ErrorResponse, IntoErrorResponse};
pub use logging::init_tracing;
