//! The service shares no mutable state, so threads see the same results as a
//! sequential caller.

use std::sync::Arc;
use std::thread;

use super::{create_test_service, ACCESS_LIFETIME, REFRESH_LIFETIME};
use crate::domain::entities::identity::Identity;
use crate::errors::{DomainError, TokenError};
use crate::services::token::TokenService;

/// Everything about a lifecycle run except wall-clock timestamps
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    identity: Identity,
    access_lifetime: i64,
    refresh_lifetime: i64,
    refreshed_lifetime: i64,
    refreshed_identity: Identity,
    rejected_garbage: bool,
}

fn run_lifecycle(service: &TokenService, identity: &Identity) -> Outcome {
    let access = service.generate_access_token(identity).unwrap();
    let refresh = service.generate_refresh_token(identity).unwrap();
    let refreshed = service.refresh_access_token(&refresh).unwrap();

    let access_claims = service.decode_claims(&access).unwrap();
    let refresh_claims = service.decode_claims(&refresh).unwrap();
    let refreshed_claims = service.decode_claims(&refreshed).unwrap();

    Outcome {
        identity: access_claims.identity(),
        access_lifetime: access_claims.lifetime(),
        refresh_lifetime: refresh_claims.lifetime(),
        refreshed_lifetime: refreshed_claims.lifetime(),
        refreshed_identity: refreshed_claims.identity(),
        rejected_garbage: matches!(
            service.validate_jwt("garbage"),
            Err(DomainError::Token(TokenError::InvalidToken { .. }))
        ),
    }
}

fn identities() -> Vec<Identity> {
    (1..=16)
        .map(|i| Identity::new(i, format!("user{}@example.com", i)))
        .collect()
}

#[test]
fn test_concurrent_matches_sequential() {
    let service = Arc::new(create_test_service());
    let identities = identities();

    let sequential: Vec<Outcome> = identities
        .iter()
        .map(|identity| run_lifecycle(&service, identity))
        .collect();

    let concurrent: Vec<Outcome> = thread::scope(|scope| {
        let handles: Vec<_> = identities
            .iter()
            .map(|identity| {
                let service = Arc::clone(&service);
                scope.spawn(move || run_lifecycle(&service, identity))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
    for outcome in &concurrent {
        assert_eq!(outcome.access_lifetime, ACCESS_LIFETIME);
        assert_eq!(outcome.refresh_lifetime, REFRESH_LIFETIME);
        assert_eq!(outcome.refreshed_lifetime, ACCESS_LIFETIME);
        assert_eq!(outcome.identity, outcome.refreshed_identity);
        assert!(outcome.rejected_garbage);
    }
}

#[test]
fn test_tokens_validate_across_threads() {
    let service = Arc::new(create_test_service());

    let tokens: Vec<String> = identities()
        .iter()
        .map(|identity| service.generate_access_token(identity).unwrap())
        .collect();

    let validated: Vec<i64> = thread::scope(|scope| {
        let handles: Vec<_> = tokens
            .iter()
            .map(|token| {
                let service = Arc::clone(&service);
                scope.spawn(move || {
                    service.validate_jwt(token).unwrap()["id"]
                        .as_i64()
                        .unwrap()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(validated, (1..=16).collect::<Vec<i64>>());
}
