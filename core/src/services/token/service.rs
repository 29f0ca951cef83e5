//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use jw_shared::config::JwtConfig;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::entities::identity::{ensure_issuable, Identity, JwtPayload};
use crate::domain::entities::token::{ClaimMap, Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Tokens are always signed and verified with HMAC-SHA256
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Stateless service issuing and validating HS256 JWTs
///
/// All methods take `&self` and touch no mutable state, so one instance can
/// be shared across threads behind an `Arc`.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Creates a token service from the shared JWT configuration
    pub fn from_jwt_config(jwt: &JwtConfig) -> DomainResult<Self> {
        Ok(Self::new(TokenServiceConfig::try_from(jwt)?))
    }

    /// Creates a token service from the process-wide configuration
    pub fn from_global() -> DomainResult<Self> {
        Self::from_jwt_config(JwtConfig::global()?)
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Generates an access token
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed compact token
    /// * `Err(TokenError::InvalidPayload)` - Zero id or empty email
    pub fn generate_access_token<P>(&self, payload: &P) -> DomainResult<String>
    where
        P: JwtPayload + ?Sized,
    {
        self.issue(payload, TokenKind::Access)
    }

    /// Generates a refresh token
    ///
    /// Same claims as an access token; only the expiration differs.
    pub fn generate_refresh_token<P>(&self, payload: &P) -> DomainResult<String>
    where
        P: JwtPayload + ?Sized,
    {
        self.issue(payload, TokenKind::Refresh)
    }

    /// Generates an access and a refresh token for the same identity
    pub fn generate_token_pair<P>(&self, payload: &P) -> DomainResult<TokenPair>
    where
        P: JwtPayload + ?Sized,
    {
        let access_token = self.generate_access_token(payload)?;
        let refresh_token = self.generate_refresh_token(payload)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_seconds,
            self.config.refresh_token_expiry_seconds,
        ))
    }

    /// Validates a token and returns its claims as a key-value mapping
    ///
    /// # Returns
    ///
    /// * `Ok(ClaimMap)` - Every claim carried by the token
    /// * `Err(TokenError::InvalidToken)` - Malformed, badly signed or expired
    pub fn validate_jwt(&self, token: &str) -> DomainResult<ClaimMap> {
        self.decode_jwt(token)
    }

    /// Validates a token and returns its claims as [`Claims`]
    pub fn decode_claims(&self, token: &str) -> DomainResult<Claims> {
        self.decode_jwt(token)
    }

    /// Issues a new access token for the identity inside a valid refresh token
    pub fn refresh_access_token(&self, refresh_token: &str) -> DomainResult<String> {
        let claims = self.validate_jwt(refresh_token)?;
        let identity = Identity::from_claim_map(&claims)
            .map_err(|e| TokenError::invalid_token(e.to_string()))?;

        let access_token = self.generate_access_token(&identity)?;
        info!(user_id = identity.id, "Access token refreshed");
        Ok(access_token)
    }

    fn issue<P>(&self, payload: &P, kind: TokenKind) -> DomainResult<String>
    where
        P: JwtPayload + ?Sized,
    {
        ensure_issuable(payload)?;

        let lifetime = match kind {
            TokenKind::Access => self.config.access_token_expiry_seconds,
            TokenKind::Refresh => self.config.refresh_token_expiry_seconds,
        };
        let claims = Claims::new(
            payload,
            Utc::now().timestamp(),
            lifetime,
            &self.config.issuer,
            &self.config.audience,
        )?;

        let token = self.encode_jwt(&claims)?;
        debug!(
            kind = %kind,
            user_id = claims.id,
            expires_at = claims.exp,
            "Issued token"
        );
        Ok(token)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(ALGORITHM);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            DomainError::Token(TokenError::TokenGenerationFailed {
                reason: e.to_string(),
            })
        })
    }

    fn decode_jwt<T: DeserializeOwned>(&self, token: &str) -> DomainResult<T> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let expired = matches!(e.kind(), ErrorKind::ExpiredSignature);
                warn!(reason = %e, expired, "Token validation failed");
                DomainError::Token(TokenError::InvalidToken {
                    reason: e.to_string(),
                    expired,
                })
            })
    }
}
