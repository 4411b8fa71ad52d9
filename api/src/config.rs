//! Process configuration loading and service construction

use std::path::Path;

use anyhow::Context;
use tw_core::services::token::{TokenService, TokenServiceConfig};
use tw_shared::config::{AppConfig, ConfigError, Environment};

/// Loads `.env` files and reads the application configuration
///
/// The environment-specific file (`.env.production`, ...) is applied first so
/// its values win over the shared `.env`. Variables already set in the
/// process environment are never overwritten.
pub fn load() -> Result<AppConfig, ConfigError> {
    let environment = Environment::from_lookup(&|key: &str| std::env::var(key).ok());

    let env_file = environment.env_file();
    if Path::new(env_file).exists() {
        dotenvy::from_filename(env_file).ok();
    }
    dotenvy::dotenv().ok();

    AppConfig::from_env()
}

/// Builds the token service from loaded settings
pub fn build_token_service(config: &AppConfig) -> anyhow::Result<TokenService> {
    let service_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("invalid token service configuration")?;

    TokenService::new(service_config).context("failed to initialise token service")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_token_service_from_lookup() {
        let lookup = |key: &str| match key {
            "JWT_SECRET" => Some("s1".to_string()),
            "JWT_ACCESS_TOKEN_EXPIRY" => Some("5m".to_string()),
            "JWT_ISSUER" => Some("tokenward".to_string()),
            _ => None,
        };
        let config = AppConfig::from_lookup(&lookup).unwrap();

        let service = build_token_service(&config).unwrap();
        assert_eq!(service.access_expires_in(), 300);
        assert_eq!(service.config().issuer.as_deref(), Some("tokenward"));
    }

    #[test]
    fn test_build_token_service_rejects_unknown_algorithm() {
        let lookup = |key: &str| match key {
            "JWT_SECRET" => Some("s1".to_string()),
            "JWT_ALGORITHM" => Some("RS256".to_string()),
            _ => None,
        };
        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert!(build_token_service(&config).is_err());
    }
}
