//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token type reported to clients alongside issued tokens
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Opaque user identifier carried in tokens
///
/// The identity source decides whether users are keyed by number or by
/// string; both shapes survive a round trip through the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Int(id) => write!(f, "{}", id),
            UserId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Int(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Str(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Str(id.to_string())
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        UserId::Str(id.to_string())
    }
}

/// Identity of an already-authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique user identifier
    pub user_id: UserId,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,
}

impl Identity {
    /// Creates a new identity
    pub fn new(
        user_id: impl Into<UserId>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Which expiry window produced a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims structure for JWT payload
///
/// Temporal claims are NumericDate values (whole seconds since the epoch).
/// `jti`, `iss` and `kind` are optional on decode so tokens minted by
/// an instance that does not stamp them still verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier
    pub user_id: UserId,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Access or refresh, carried on the wire as `token_type`
    #[serde(
        rename = "token_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<TokenKind>,
}

impl Claims {
    /// Creates claims for `identity` valid from `issued_at` for `lifetime`
    pub fn new(
        identity: Identity,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: Option<String>,
    ) -> Self {
        let iat = issued_at.timestamp();

        Self {
            user_id: identity.user_id,
            username: identity.username,
            email: identity.email,
            iat,
            nbf: iat,
            exp: iat.saturating_add(lifetime.num_seconds()),
            jti: Some(Uuid::new_v4().to_string()),
            iss: issuer,
            kind: Some(kind),
        }
    }

    /// Identity fields carried by these claims
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// `iat <= nbf <= exp`
    pub fn has_ordered_timestamps(&self) -> bool {
        self.iat <= self.nbf && self.nbf <= self.exp
    }

    /// Whether `nbf` has been reached at `now` (seconds), allowing `leeway`
    pub fn is_active_at(&self, now: i64, leeway: i64) -> bool {
        now.saturating_add(leeway) >= self.nbf
    }

    /// Whether `exp` has passed at `now` (seconds), allowing `leeway`
    ///
    /// `exp` itself is still inside the window.
    pub fn is_expired_at(&self, now: i64, leeway: i64) -> bool {
        now.saturating_sub(leeway) > self.exp
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            access_expires_in,
            refresh_expires_in,
        }
    }
}
