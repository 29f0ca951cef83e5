//! Domain entities representing token contents and the identities they carry.

pub mod identity;
pub mod token;

// Re-export commonly used types
pub use identity::{Identity, JwtPayload};
pub use token::{ClaimMap, Claims, TokenKind, TokenPair, BEARER_TOKEN_TYPE};
