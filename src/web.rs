use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ForecastConfig;
use crate::forecast_service::ForecastService;
use crate::weather::OpenMeteoClient;

/// Build the application router around one shared upstream client.
pub fn app(config: &ForecastConfig) -> Result<Router> {
    let client = OpenMeteoClient::new(&config.upstream)?;
    let service = Arc::new(ForecastService::new(Arc::new(client), &config.defaults));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(api::router(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

pub async fn run(config: &ForecastConfig) -> Result<()> {
    let app = app(config)?;

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Forecast service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Forecast service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
