//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing secret, expiry windows and validation policy
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server bind settings
//!
//! Every loader takes an [`EnvLookup`] so tests can feed fixed values
//! instead of mutating the process environment.

pub mod auth;
pub mod environment;
pub mod server;

use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Source of configuration values, keyed by variable name
pub type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {name}")]
    Missing { name: &'static str },

    #[error("invalid configuration {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary lookup
    pub fn from_lookup(lookup: &EnvLookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(lookup);

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(lookup)?,
            auth: AuthConfig::from_lookup(lookup)?,
            logging: LoggingConfig::from_lookup(environment, lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_from_lookup() {
        let lookup = |key: &str| match key {
            "ENVIRONMENT" => Some("production".to_string()),
            "JWT_SECRET" => Some("s1".to_string()),
            "SERVER_PORT" => Some("9090".to_string()),
            _ => None,
        };
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert!(config.environment.is_production());
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.jwt.secret_bytes(), b"s1");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_app_config_requires_secret() {
        let lookup = |_: &str| -> Option<String> { None };
        let err = AppConfig::from_lookup(&lookup).unwrap_err();
        assert_eq!(err.to_string(), "missing required configuration: JWT_SECRET");
    }
}
