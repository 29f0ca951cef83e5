//! JWT signing and validation configuration

use std::fmt;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::{parse_var, Lookup};
use crate::errors::ConfigError;

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// The only signing algorithm the token service supports
pub const SUPPORTED_ALGORITHM: &str = "HS256";

/// Largest accepted token lifetime in either direction (100 years)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 100 * 365 * 86400;

static GLOBAL: OnceCell<JwtConfig> = OnceCell::new();

/// JWT authentication configuration
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used for HMAC signing
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Seconds of clock tolerance granted by the JWT library on `exp`
    #[serde(default)]
    pub leeway: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("jwt-service"),
            audience: String::from("jwt-service-api"),
            algorithm: default_algorithm(),
            leeway: 0,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("algorithm", &self.algorithm)
            .field("leeway", &self.leeway)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86400);
        self
    }

    /// Set access token expiry in seconds (may be negative to mint expired tokens)
    pub fn with_access_expiry_seconds(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expiry_seconds(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `JWT_SECRET` is mandatory. `JWT_ISSUER`, `JWT_AUDIENCE`,
    /// `JWT_ACCESS_TOKEN_EXPIRY`, `JWT_REFRESH_TOKEN_EXPIRY` and `JWT_LEEWAY`
    /// fall back to the defaults when absent but fail when unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup: &Lookup<'_> = &lookup;
        let defaults = Self::default();

        let secret = lookup("JWT_SECRET").ok_or_else(|| ConfigError::Missing {
            key: "JWT_SECRET".to_string(),
        })?;

        let config = Self {
            secret,
            access_token_expiry: parse_var(
                lookup,
                "JWT_ACCESS_TOKEN_EXPIRY",
                defaults.access_token_expiry,
            )?,
            refresh_token_expiry: parse_var(
                lookup,
                "JWT_REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_expiry,
            )?,
            issuer: lookup("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: lookup("JWT_AUDIENCE").unwrap_or(defaults.audience),
            algorithm: lookup("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
            leeway: parse_var(lookup, "JWT_LEEWAY", defaults.leeway)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the token service cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Invalid {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if self.issuer.is_empty() {
            return Err(ConfigError::Invalid {
                message: "JWT issuer must not be empty".to_string(),
            });
        }
        if self.audience.is_empty() {
            return Err(ConfigError::Invalid {
                message: "JWT audience must not be empty".to_string(),
            });
        }
        for (key, lifetime) in [
            ("JWT_ACCESS_TOKEN_EXPIRY", self.access_token_expiry),
            ("JWT_REFRESH_TOKEN_EXPIRY", self.refresh_token_expiry),
        ] {
            if lifetime.unsigned_abs() > MAX_TOKEN_LIFETIME_SECONDS as u64 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: lifetime.to_string(),
                });
            }
        }
        if self.algorithm != SUPPORTED_ALGORITHM {
            return Err(ConfigError::InvalidValue {
                key: "JWT_ALGORITHM".to_string(),
                value: self.algorithm.clone(),
            });
        }
        Ok(())
    }

    /// Process-wide configuration, loaded from the environment on first use
    ///
    /// The environment-specific dotenv file (e.g. `.env.production`) is read
    /// first, then `.env`; variables already set in the process win.
    /// Initialization runs at most once even under concurrent first access.
    pub fn global() -> Result<&'static JwtConfig, ConfigError> {
        GLOBAL.get_or_try_init(|| {
            let environment = Environment::from_env();
            dotenvy::from_filename(environment.env_file()).ok();
            dotenvy::dotenv().ok();

            let config = Self::from_env()?;
            if config.is_using_default_secret() {
                tracing::warn!("JWT_SECRET is set to the development default");
            }
            Ok(config)
        })
    }
}

fn default_algorithm() -> String {
    String::from(SUPPORTED_ALGORITHM)
}
