//! Link TXT automation HTTP service.
//!
//! Exposes API key verification and spreadsheet batch upload on top of the
//! automation context.

use axum::Router;
use axum::extract::DefaultBodyLimit;

pub mod config;
pub mod error;
pub mod ingest;
pub mod routes;
pub mod state;

/// Builds the application router with every route mounted.
#[must_use]
pub fn app(state: state::AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::credentials::router())
        .merge(routes::batch::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
