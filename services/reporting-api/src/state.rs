//! Application state and shared resources.

use std::sync::Arc;

use crate::config::{Args, DEFAULT_MAX_BODY_BYTES};
use crate::metrics::MetricsCollector;

/// Shared application state.
pub struct AppState {
    pub metrics: Arc<MetricsCollector>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(max_body_bytes: usize) -> Self {
        Self {
            metrics: Arc::new(MetricsCollector::new()),
            max_body_bytes,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(args.max_body_bytes)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_BYTES)
    }
}
