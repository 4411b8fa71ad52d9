use actix_web::{web, HttpResponse};
use tw_core::domain::entities::token::BEARER_TOKEN_TYPE;
use tw_core::services::token::TokenService;
use validator::Validate;

use crate::dto::auth_dto::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::error_handler::{token_error_response, validation_error_response};

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a still-valid refresh token for a new access token. The refresh
/// token is not reissued; clients keep the one they hold until it expires.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `refresh_token` missing or empty
/// - 401 Unauthorized: `TOKEN_EXPIRED` or `TOKEN_INVALID`
/// - 500 Internal Server Error: signing failure
pub async fn refresh_token(
    token_service: web::Data<TokenService>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match token_service.refresh_access_token(&request.refresh_token) {
        Ok(access_token) => {
            tracing::debug!("Access token refreshed");
            HttpResponse::Ok().json(RefreshTokenResponse {
                access_token,
                token_type: BEARER_TOKEN_TYPE.to_string(),
                expires_in: token_service.access_expires_in(),
            })
        }
        Err(error) => {
            tracing::info!(error = %error, "Refresh rejected");
            token_error_response(&error)
        }
    }
}
