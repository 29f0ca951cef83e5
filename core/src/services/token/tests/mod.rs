mod concurrency_tests;

use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) const TEST_SECRET: &str = "test-secret-key-for-unit-tests";
pub(super) const ACCESS_LIFETIME: i64 = 900;
pub(super) const REFRESH_LIFETIME: i64 = 604800;

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        issuer: "test-issuer".to_string(),
        audience: "test-audience".to_string(),
        access_token_expiry_seconds: ACCESS_LIFETIME,
        refresh_token_expiry_seconds: REFRESH_LIFETIME,
        leeway_seconds: 0,
    }
}

pub(super) fn create_test_service() -> TokenService {
    TokenService::new(test_config())
}
