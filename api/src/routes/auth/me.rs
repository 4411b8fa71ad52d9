use actix_web::HttpResponse;

use crate::dto::auth_dto::MeResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Requires [`JwtAuth`](crate::middleware::auth::JwtAuth) on the route.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user_id: auth.user_id,
        username: auth.username,
        email: auth.email,
        jti: auth.jti,
        expires_at: auth.expires_at,
    })
}
