use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use tw_api::{app::create_app, config, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load().context("failed to load configuration")?;

    telemetry::init(&app_config.logging);

    tracing::info!(
        environment = %app_config.environment,
        "Starting Tokenward API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let token_service = web::Data::new(config::build_token_service(&app_config)?);
    tracing::info!(
        access_expires_in = token_service.access_expires_in(),
        algorithm = ?token_service.config().algorithm,
        "Token service ready"
    );

    let bind_address = app_config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(token_service.clone()).wrap(TracingLogger::default())
    });
    if app_config.server.workers > 0 {
        server = server.workers(app_config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
