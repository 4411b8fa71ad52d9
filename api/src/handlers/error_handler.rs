//! Mapping of core errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use tw_core::errors::TokenError;
use tw_shared::errors::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Response for a token rejection or issuance failure
///
/// The body carries only the stable code and a generic message; the internal
/// reason for an `Invalid` rejection is never exposed.
pub fn token_error_response(error: &TokenError) -> HttpResponse {
    if let TokenError::SigningFailed { .. } = error {
        tracing::error!(error = %error, "Token signing failed");
    }

    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse::from(error))
}

/// 400 response listing the fields that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("validation_errors", errors),
    )
}
