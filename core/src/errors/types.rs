//! Token error taxonomy
//!
//! Callers see exactly two rejection kinds, `Expired` and `Invalid`, plus the
//! internal `SigningFailed`. The `reason` on `Invalid` is a diagnostic for
//! operators and is never placed in a client-facing response.

use thiserror::Error;
use tw_shared::errors::{error_codes, ErrorResponse};

use crate::domain::entities::token::TokenKind;

/// Token validation and issuance errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {reason}")]
    Invalid { reason: &'static str },

    #[error("Failed to sign {kind} token: {reason}")]
    SigningFailed { kind: TokenKind, reason: String },
}

impl TokenError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        TokenError::Invalid { reason }
    }

    /// Whether the token was genuine but its lifetime is over
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired)
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TokenError::Expired | TokenError::Invalid { .. } => 401,
            TokenError::SigningFailed { .. } => 500,
        }
    }

    /// Error code (client-facing)
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::Invalid { .. } => error_codes::TOKEN_INVALID,
            TokenError::SigningFailed { .. } => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<&TokenError> for ErrorResponse {
    fn from(error: &TokenError) -> Self {
        let message = match error {
            TokenError::Expired => "Token has expired",
            TokenError::Invalid { .. } => "Token is invalid",
            TokenError::SigningFailed { .. } => "An internal error occurred",
        };
        ErrorResponse::new(error.code(), message)
    }
}
