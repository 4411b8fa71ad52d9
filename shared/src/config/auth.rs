//! Authentication configuration
//!
//! The signing secret and both expiry windows are read once at startup and
//! handed to the token service; nothing here is consulted afterwards.

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};

use super::{ConfigError, EnvLookup};
use crate::utils::duration::parse_duration;

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: &str = "15m";

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: &str = "168h";

/// Default signing algorithm
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// JWT signing and expiry configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Symmetric signing secret (never printed)
    pub secret: SecretString,

    /// Access token lifetime
    pub access_token_expiry: Duration,

    /// Refresh token lifetime
    pub refresh_token_expiry: Duration,

    /// Algorithm name for JWT signing (HS256, HS384 or HS512)
    pub algorithm: String,

    /// Optional `iss` claim stamped on and required from every token
    pub issuer: Option<String>,

    /// Tolerated clock skew in seconds when checking `nbf`/`exp`
    pub leeway_seconds: u64,

    /// Reject refresh tokens on authenticated routes and access tokens on refresh
    pub enforce_token_kind: bool,
}

impl JwtConfig {
    /// Create a new JWT configuration with secret and default expiries
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            access_token_expiry: Duration::minutes(15),
            refresh_token_expiry: Duration::hours(168),
            algorithm: String::from(DEFAULT_ALGORITHM),
            issuer: None,
            leeway_seconds: 0,
            enforce_token_kind: false,
        }
    }

    /// Set access token expiry
    pub fn with_access_expiry(mut self, expiry: Duration) -> Self {
        self.access_token_expiry = expiry;
        self
    }

    /// Set refresh token expiry
    pub fn with_refresh_expiry(mut self, expiry: Duration) -> Self {
        self.refresh_token_expiry = expiry;
        self
    }

    /// Read the `JWT_*` variables
    ///
    /// `JWT_SECRET` is mandatory and must not be empty. Expiries accept a bare
    /// number of seconds or a `s`/`m`/`h`/`d` suffix.
    pub fn from_lookup(lookup: &EnvLookup<'_>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing { name: "JWT_SECRET" })?;
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: "signing secret must not be empty".to_string(),
            });
        }

        let access_token_expiry = read_expiry(
            lookup,
            "JWT_ACCESS_TOKEN_EXPIRY",
            DEFAULT_ACCESS_TOKEN_EXPIRY,
        )?;
        let refresh_token_expiry = read_expiry(
            lookup,
            "JWT_REFRESH_TOKEN_EXPIRY",
            DEFAULT_REFRESH_TOKEN_EXPIRY,
        )?;

        let leeway_seconds = match lookup("JWT_LEEWAY_SECONDS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "JWT_LEEWAY_SECONDS",
                reason: format!("'{}' is not a whole number of seconds", raw),
            })?,
            None => 0,
        };

        let enforce_token_kind = match lookup("JWT_ENFORCE_TOKEN_KIND") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                name: "JWT_ENFORCE_TOKEN_KIND",
                reason: format!("'{}' is not a boolean", raw),
            })?,
            None => false,
        };

        Ok(Self {
            secret: SecretString::from(secret),
            access_token_expiry,
            refresh_token_expiry,
            algorithm: lookup("JWT_ALGORITHM")
                .map(|alg| alg.trim().to_uppercase())
                .unwrap_or_else(|| String::from(DEFAULT_ALGORITHM)),
            issuer: lookup("JWT_ISSUER").filter(|iss| !iss.is_empty()),
            leeway_seconds,
            enforce_token_kind,
        })
    }

    /// Raw secret bytes for key construction
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from an environment lookup
    pub fn from_lookup(lookup: &EnvLookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_lookup(lookup)?,
        })
    }
}

fn read_expiry(
    lookup: &EnvLookup<'_>,
    name: &'static str,
    default: &str,
) -> Result<Duration, ConfigError> {
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    let expiry = parse_duration(&raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;

    if expiry <= Duration::zero() {
        return Err(ConfigError::Invalid {
            name,
            reason: "expiry must be positive".to_string(),
        });
    }

    Ok(expiry)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
