//! Health checks, metrics, and monitoring endpoints.

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::instrument;

use crate::state::AppState;

// ============================================================================
// Health Checks
// ============================================================================

/// GET /health - Basic health check
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Prometheus Metrics
// ============================================================================

/// GET /metrics - Prometheus text exposition
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response()
}

// ============================================================================
// JSON Metrics API
// ============================================================================

/// GET /api/metrics - JSON render statistics
#[instrument(skip(state))]
pub async fn api_metrics_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let snap = state.metrics.snapshot().await;
    Json(serde_json::json!({
        "uptime_secs": snap.uptime_secs,
        "requests": snap.requests,
        "renders": {
            "total": snap.renders_total,
            "errors": snap.render_errors,
            "validation_failures": snap.validation_failures,
            "png_bytes_total": snap.png_bytes_total
        },
        "render_ms": {
            "avg": snap.render_avg_ms,
            "last": snap.render_last_ms,
            "min": snap.render_min_ms,
            "max": snap.render_max_ms
        },
        "limits": {
            "max_body_bytes": state.max_body_bytes
        }
    }))
}
