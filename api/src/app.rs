//! Application factory
//!
//! Builds the Actix-web application around a shared [`TokenService`].

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    web, App, Error, HttpRequest, HttpResponse,
};
use tw_core::services::token::TokenService;
use tw_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{me, refresh_token};

/// Create and configure the application with all dependencies
///
/// Request logging is added by the caller so tests can use the bare app.
pub fn create_app(
    token_service: web::Data<TokenService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(token_service)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .configure(configure_routes)
        .default_service(web::route().to(not_found))
}

/// Registers all routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1").service(
            web::scope("/auth")
                .route("/refresh", web::post().to(refresh_token))
                .service(
                    web::resource("/me")
                        .wrap(JwtAuth::new())
                        .route(web::get().to(me)),
                ),
        ),
    );
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tokenward-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

/// Malformed or incomplete JSON bodies become a `VALIDATION_ERROR`
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    tracing::debug!(error = %err, "Rejected request body");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Invalid request body",
    ));
    InternalError::from_response(err, response).into()
}
