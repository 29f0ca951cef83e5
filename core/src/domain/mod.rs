//! Domain layer containing token entities and the identity payload contract.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    ClaimMap, Claims, Identity, JwtPayload, TokenKind, TokenPair, BEARER_TOKEN_TYPE,
};
