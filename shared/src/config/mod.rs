//! Configuration module
//!
//! - `auth` - JWT secret, issuer, audience and token lifetimes
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod environment;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Key lookup used to read configuration (process environment in production)
pub(crate) type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Complete application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup: &Lookup<'_> = &lookup;
        let environment = Environment::from_lookup(lookup);

        Ok(Self {
            environment,
            jwt: JwtConfig::from_lookup(lookup)?,
            logging: LoggingConfig::from_lookup(environment, lookup)?,
        })
    }
}

/// Parse an optional variable, keeping `default` when it is absent
pub(crate) fn parse_var<T: FromStr>(
    lookup: &Lookup<'_>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_from_lookup() {
        let config = AppConfig::from_lookup(|key| match key {
            "ENVIRONMENT" => Some("staging".to_string()),
            "JWT_SECRET" => Some("s3cret".to_string()),
            "JWT_ACCESS_TOKEN_EXPIRY" => Some(" 120 ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.jwt.access_token_expiry, 120);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_app_config_propagates_jwt_errors() {
        let result = AppConfig::from_lookup(|_| None);
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }
}
