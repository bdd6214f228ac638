//! Chart generation endpoint.

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use renderer::render_report;
use report_common::{validate_chart_request, FieldError, ReportError};

use crate::metrics::Timer;
use crate::state::AppState;

/// POST /charts/generate - Render the three-panel report as PNG
#[instrument(skip(state, body), fields(body_bytes = body.len()))]
pub async fn generate_chart_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Response {
    state.metrics.record_request();

    let request = match validate_chart_request(&body) {
        Ok(request) => request,
        Err(err) => {
            let fields: Vec<String> = err.field_errors().iter().map(FieldError::path).collect();
            warn!(errors = fields.len(), fields = ?fields, "Chart request rejected");
            state.metrics.record_validation_failure(fields.len());
            return error_response(&err);
        }
    };

    let period = request.period;
    let timer = Timer::start();
    let rendered = tokio::task::spawn_blocking(move || render_report(&request))
        .await
        .map_err(|e| ReportError::InternalError(format!("render task failed: {}", e)))
        .and_then(|result| result.map_err(ReportError::from));
    let elapsed_us = timer.elapsed_us();

    match rendered {
        Ok(png) => {
            state.metrics.record_render(elapsed_us, Some(png.len())).await;
            info!(
                period = %period,
                png_bytes = png.len(),
                render_ms = elapsed_us as f64 / 1000.0,
                "Chart rendered"
            );
            png_response(png)
        }
        Err(err) => {
            state.metrics.record_render(elapsed_us, None).await;
            error!(period = %period, error = %err, "Chart rendering failed");
            error_response(&err)
        }
    }
}

fn png_response(png: Vec<u8>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response()
}

/// JSON `{"detail": ...}` body with the error's status code.
pub fn error_response(err: &ReportError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.detail())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_common::LocSegment;

    #[test]
    fn test_validation_error_is_422() {
        let err = ReportError::Validation(vec![FieldError::new(
            vec![LocSegment::from("body"), LocSegment::from("period")],
            "missing",
            "Field required",
        )]);
        assert_eq!(error_response(&err).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_render_error_is_500() {
        let err = ReportError::RenderError("font".to_string());
        assert_eq!(error_response(&err).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_png_content_type() {
        let response = png_response(vec![0x89, b'P', b'N', b'G']);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    }
}
