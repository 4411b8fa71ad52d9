//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, Identity, TokenKind, TokenPair};
use crate::errors::{DomainResult, TokenError, TokenResult};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Maximum accepted token size in bytes (8KB)
///
/// Anything larger is rejected before base64 decoding or signature work.
pub const MAX_TOKEN_SIZE_BYTES: usize = 8192;

/// Issues, validates and refreshes signed JWTs
///
/// Holds only immutable configuration and key material, so a single instance
/// can be shared across threads and used concurrently without locking.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service reading wall-clock time
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` if the secret is empty, an expiry is not
    /// positive, or the algorithm is not HMAC.
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit time source
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_bytes());

        // Time checks are done against the injected clock after the signature
        // has been verified, so the library's own wall-clock checks are off.
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        match config.issuer {
            // `iss` must be present, not only match when present
            Some(ref issuer) => {
                validation.set_required_spec_claims(&["exp", "nbf", "iss"]);
                validation.set_issuer(&[issuer]);
            }
            None => validation.set_required_spec_claims(&["exp", "nbf"]),
        }

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        })
    }

    /// Configuration this service was built with
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Access token lifetime in whole seconds
    pub fn access_expires_in(&self) -> i64 {
        self.config.access_expires_in()
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    ///
    /// Both tokens share one issued-at instant; each expires after its own
    /// configured window.
    ///
    /// # Errors
    ///
    /// `TokenError::SigningFailed` naming the token kind that failed.
    pub fn generate_tokens(&self, identity: &Identity) -> TokenResult<TokenPair> {
        let now = self.clock.now();

        let access_token = self.issue(identity.clone(), TokenKind::Access, now)?;
        let refresh_token = self.issue(identity.clone(), TokenKind::Refresh, now)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_expires_in(),
            self.config.refresh_expires_in(),
        ))
    }

    /// Verifies any token issued by this deployment and returns its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::Expired` - genuine token whose `exp` has passed
    /// * `TokenError::Invalid` - anything else: malformed, wrong algorithm,
    ///   bad signature, issuer mismatch, or not yet valid
    pub fn verify_token(&self, token: &str) -> TokenResult<Claims> {
        if token.len() > MAX_TOKEN_SIZE_BYTES {
            return Err(TokenError::invalid("token exceeds maximum size"));
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| map_decode_error(e.kind()))?;

        self.check_validity_window(&claims)?;

        Ok(claims)
    }

    /// Verifies a token presented on an authenticated request
    ///
    /// Same as [`verify_token`](Self::verify_token); with token kind
    /// enforcement on, refresh tokens are also rejected.
    pub fn verify_access_token(&self, token: &str) -> TokenResult<Claims> {
        let claims = self.verify_token(token)?;
        self.check_kind(&claims, TokenKind::Access)?;
        Ok(claims)
    }

    /// Mints a fresh access token from a still-valid refresh token
    ///
    /// The refresh token itself is not touched; once it expires the user has
    /// to authenticate again.
    ///
    /// # Errors
    ///
    /// Propagates `Expired`/`Invalid` from validation unchanged, or
    /// `SigningFailed` if the new token cannot be signed.
    pub fn refresh_access_token(&self, refresh_token: &str) -> TokenResult<String> {
        let claims = self.verify_token(refresh_token)?;
        self.check_kind(&claims, TokenKind::Refresh)?;

        self.issue(claims.identity(), TokenKind::Access, self.clock.now())
    }

    fn issue(&self, identity: Identity, kind: TokenKind, now: DateTime<Utc>) -> TokenResult<String> {
        let lifetime = match kind {
            TokenKind::Access => self.config.access_token_expiry,
            TokenKind::Refresh => self.config.refresh_token_expiry,
        };
        let claims = Claims::new(identity, kind, now, lifetime, self.config.issuer.clone());

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key).map_err(|e| {
            TokenError::SigningFailed {
                kind,
                reason: e.to_string(),
            }
        })
    }

    fn check_validity_window(&self, claims: &Claims) -> TokenResult<()> {
        if !claims.has_ordered_timestamps() {
            return Err(TokenError::invalid("temporal claims out of order"));
        }

        let now = self.clock.now().timestamp();
        // Bounded by MAX_LEEWAY_SECONDS at construction.
        let leeway = self.config.leeway_seconds as i64;

        if !claims.is_active_at(now, leeway) {
            return Err(TokenError::invalid("token not yet valid"));
        }
        if claims.is_expired_at(now, leeway) {
            return Err(TokenError::Expired);
        }
        Ok(())
    }

    fn check_kind(&self, claims: &Claims, expected: TokenKind) -> TokenResult<()> {
        if !self.config.enforce_token_kind || claims.kind == Some(expected) {
            return Ok(());
        }
        Err(match expected {
            TokenKind::Access => TokenError::invalid("expected an access token"),
            TokenKind::Refresh => TokenError::invalid("expected a refresh token"),
        })
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::invalid("signature mismatch"),
        ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            TokenError::invalid("unexpected signing algorithm")
        }
        ErrorKind::InvalidIssuer => TokenError::invalid("issuer mismatch"),
        ErrorKind::MissingRequiredClaim(_) => TokenError::invalid("missing required claim"),
        ErrorKind::ImmatureSignature => TokenError::invalid("token not yet valid"),
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => TokenError::invalid("malformed token segment"),
        ErrorKind::Base64(_) => TokenError::invalid("malformed token encoding"),
        _ => TokenError::invalid("malformed token"),
    }
}
