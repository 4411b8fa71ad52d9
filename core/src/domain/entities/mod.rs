//! Domain entities representing core business objects.

pub mod token;

pub use token::{Claims, Identity, TokenKind, TokenPair, UserId, BEARER_TOKEN_TYPE};
