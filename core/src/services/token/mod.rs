//! Token service module for JWT management
//!
//! Stateless issuance and verification of signed access and refresh tokens:
//! - Access/refresh pair generation for an authenticated identity
//! - Signature, algorithm, issuer and validity-window checks
//! - Access token renewal from a refresh token
//! - Injectable clock for deterministic expiry

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TokenServiceConfig, MAX_LEEWAY_SECONDS};
pub use service::{TokenService, MAX_TOKEN_SIZE_BYTES};
