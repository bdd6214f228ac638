//! HTTP request handlers.
//!
//! - `charts`: report rendering
//! - `metrics`: health checks, Prometheus metrics, and the JSON metrics API

pub mod charts;
pub mod metrics;

pub use charts::{error_response, generate_chart_handler};
pub use metrics::{api_metrics_handler, health_handler, metrics_handler};
