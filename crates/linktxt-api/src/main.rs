//! Link TXT automation API server entry point.

use std::sync::Arc;

use linktxt_api::config::Config;
use linktxt_api::error::AppError;
use linktxt_api::state::AppState;
use linktxt_core::clock::SystemClock;
use linktxt_core::id::RandomIdGenerator;
use linktxt_vendor::HttpVendorApi;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Link TXT automation API server");

    let config = Config::from_env()?;
    if config.fallback_credential.is_none() {
        tracing::info!("API_KEY not set; uploads must supply their own key");
    }

    let vendor = HttpVendorApi::new(&config.vendor)?;
    tracing::info!(base_url = %config.vendor.base_url, "vendor client ready");

    let app_state = AppState::new(
        Arc::new(vendor),
        Arc::new(RandomIdGenerator),
        Arc::new(SystemClock),
        config.fallback_credential.clone(),
    );

    // TODO: Replace CorsLayer::permissive() with the operator front end's origin.
    let mut app = linktxt_api::app(app_state, config.max_upload_bytes);
    if let Some(dir) = &config.static_dir {
        tracing::info!(static_dir = %dir.display(), "serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
