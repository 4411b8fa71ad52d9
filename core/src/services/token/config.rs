//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use secrecy::{ExposeSecret, SecretBox};
use tw_shared::config::JwtConfig;

use crate::errors::{DomainError, DomainResult};

/// Largest clock-skew leeway accepted (10 minutes)
pub const MAX_LEEWAY_SECONDS: u64 = 600;

/// Configuration for the token service
///
/// Fixed for the lifetime of a [`TokenService`](super::TokenService).
#[derive(Debug)]
pub struct TokenServiceConfig {
    /// Symmetric signing secret, as raw bytes
    pub secret: SecretBox<Vec<u8>>,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_expiry: Duration,
    /// Refresh token lifetime
    pub refresh_token_expiry: Duration,
    /// Issuer stamped into and required from every token
    pub issuer: Option<String>,
    /// Clock-skew leeway in seconds applied to `nbf` and `exp`
    pub leeway_seconds: u64,
    /// Require the `token_type` claim to match the operation
    pub enforce_token_kind: bool,
}

impl TokenServiceConfig {
    /// HS256 configuration with the given secret and expiry windows
    pub fn new(
        secret: impl Into<Vec<u8>>,
        access_token_expiry: Duration,
        refresh_token_expiry: Duration,
    ) -> Self {
        Self {
            secret: SecretBox::new(Box::new(secret.into())),
            algorithm: Algorithm::HS256,
            access_token_expiry,
            refresh_token_expiry,
            issuer: None,
            leeway_seconds: 0,
            enforce_token_kind: false,
        }
    }

    /// Builds the service configuration from loaded settings
    pub fn from_jwt_config(jwt: &JwtConfig) -> DomainResult<Self> {
        let algorithm: Algorithm = jwt.algorithm.parse().map_err(|_| {
            DomainError::validation(format!("unknown JWT algorithm '{}'", jwt.algorithm))
        })?;

        let config = Self::new(
            jwt.secret_bytes().to_vec(),
            jwt.access_token_expiry,
            jwt.refresh_token_expiry,
        )
        .with_algorithm(algorithm)
        .with_leeway(jwt.leeway_seconds)
        .with_token_kind_enforcement(jwt.enforce_token_kind);

        Ok(match &jwt.issuer {
            Some(issuer) => config.with_issuer(issuer.clone()),
            None => config,
        })
    }

    /// Set the signing algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the clock-skew leeway
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Turn token kind enforcement on or off
    pub fn with_token_kind_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_token_kind = enforce;
        self
    }

    /// Access token lifetime in whole seconds
    pub fn access_expires_in(&self) -> i64 {
        self.access_token_expiry.num_seconds()
    }

    /// Refresh token lifetime in whole seconds
    pub fn refresh_expires_in(&self) -> i64 {
        self.refresh_token_expiry.num_seconds()
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret()
    }

    /// Rejects settings that would make issued tokens unusable or forgeable
    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.secret_bytes().is_empty() {
            return Err(DomainError::validation("signing secret must not be empty"));
        }
        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::validation(format!(
                "algorithm {:?} is not a symmetric HMAC algorithm",
                self.algorithm
            )));
        }
        if self.access_token_expiry.num_seconds() <= 0 {
            return Err(DomainError::validation(
                "access token expiry must be at least one second",
            ));
        }
        if self.refresh_token_expiry.num_seconds() <= 0 {
            return Err(DomainError::validation(
                "refresh token expiry must be at least one second",
            ));
        }
        if self.refresh_token_expiry < self.access_token_expiry {
            return Err(DomainError::validation(
                "refresh token expiry must not be shorter than access token expiry",
            ));
        }
        if self.leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(DomainError::validation(format!(
                "leeway of {}s exceeds the maximum of {}s",
                self.leeway_seconds, MAX_LEEWAY_SECONDS
            )));
        }
        Ok(())
    }
}
