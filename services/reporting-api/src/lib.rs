//! Finance report chart service library.
//!
//! The router is built here so integration tests can drive it without a socket.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod state;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the service router.
pub fn app(state: Arc<AppState>, prometheus: PrometheusHandle) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        // Chart rendering
        .route("/charts/generate", post(handlers::generate_chart_handler))
        // Health check
        .route("/health", get(handlers::health_handler))
        // Metrics
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/metrics", get(handlers::api_metrics_handler))
        // Layer extensions
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
