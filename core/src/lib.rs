//! # Tokenward Core
//!
//! Token lifecycle logic for stateless bearer authentication.
//! This crate contains the token entities, the token service that issues,
//! verifies and refreshes signed credentials, and the error types callers
//! branch on.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Identity, TokenKind, TokenPair, UserId, BEARER_TOKEN_TYPE};
pub use errors::*;
pub use services::*;
