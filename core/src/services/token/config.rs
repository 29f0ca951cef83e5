//! Configuration for the token service

use std::fmt;

use jw_shared::config::JwtConfig;
use jw_shared::errors::ConfigError;

/// Configuration for the token service
#[derive(Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Value written to and required in the `iss` claim
    pub issuer: String,
    /// Value written to and required in the `aud` claim
    pub audience: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_seconds: i64,
    /// Clock tolerance applied by the JWT library when checking `exp`
    pub leeway_seconds: u64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            issuer: jwt.issuer,
            audience: jwt.audience,
            access_token_expiry_seconds: jwt.access_token_expiry,
            refresh_token_expiry_seconds: jwt.refresh_token_expiry,
            leeway_seconds: jwt.leeway,
        }
    }
}

impl fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_expiry_seconds", &self.access_token_expiry_seconds)
            .field("refresh_token_expiry_seconds", &self.refresh_token_expiry_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = ConfigError;

    fn try_from(jwt: &JwtConfig) -> Result<Self, Self::Error> {
        jwt.validate()?;
        Ok(Self {
            jwt_secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            access_token_expiry_seconds: jwt.access_token_expiry,
            refresh_token_expiry_seconds: jwt.refresh_token_expiry,
            leeway_seconds: jwt.leeway,
        })
    }
}
