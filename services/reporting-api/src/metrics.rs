//! Render counters and timings.
//!
//! Every event is recorded twice: into the Prometheus recorder through the
//! `metrics` macros, and into [`MetricsCollector`] for the JSON snapshot.

use metrics::{counter, histogram};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Copy)]
struct TimingStats {
    count: u64,
    total_us: u64,
    min_us: u64,
    max_us: u64,
    last_us: u64,
}

impl TimingStats {
    fn record(&mut self, duration_us: u64) {
        self.count += 1;
        self.total_us += duration_us;
        self.last_us = duration_us;
        if self.min_us == 0 || duration_us < self.min_us {
            self.min_us = duration_us;
        }
        if duration_us > self.max_us {
            self.max_us = duration_us;
        }
    }

    fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.total_us as f64 / self.count as f64) / 1000.0
        }
    }
}

/// Process-wide render statistics.
pub struct MetricsCollector {
    pub requests: AtomicU64,
    pub renders_total: AtomicU64,
    pub validation_failures: AtomicU64,
    pub render_errors: AtomicU64,
    pub png_bytes_total: AtomicU64,
    render_times: RwLock<TimingStats>,
    start_time: Instant,
}

/// Serializable view of [`MetricsCollector`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub requests: u64,
    pub renders_total: u64,
    pub validation_failures: u64,
    pub render_errors: u64,
    pub png_bytes_total: u64,
    pub render_avg_ms: f64,
    pub render_last_ms: f64,
    pub render_min_ms: f64,
    pub render_max_ms: f64,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            requests: AtomicU64::new(0),
            renders_total: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            render_errors: AtomicU64::new(0),
            png_bytes_total: AtomicU64::new(0),
            render_times: RwLock::new(TimingStats::default()),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming chart request.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        counter!("chart_requests_total").increment(1);
    }

    /// Record a request rejected by validation.
    pub fn record_validation_failure(&self, error_count: usize) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
        counter!("chart_validation_failures_total").increment(1);
        histogram!("chart_validation_error_count").record(error_count as f64);
    }

    /// Record a finished render, successful or not.
    pub async fn record_render(&self, duration_us: u64, png_bytes: Option<usize>) {
        histogram!("chart_render_duration_seconds").record(duration_us as f64 / 1_000_000.0);
        match png_bytes {
            Some(bytes) => {
                self.renders_total.fetch_add(1, Ordering::Relaxed);
                self.png_bytes_total.fetch_add(bytes as u64, Ordering::Relaxed);
                counter!("charts_rendered_total").increment(1);
                histogram!("chart_png_bytes").record(bytes as f64);
            }
            None => {
                self.render_errors.fetch_add(1, Ordering::Relaxed);
                counter!("chart_render_errors_total").increment(1);
            }
        }
        self.render_times.write().await.record(duration_us);
    }

    /// Get current metrics snapshot
    pub async fn snapshot(&self) -> MetricsSnapshot {
        let render_times = *self.render_times.read().await;
        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            requests: self.requests.load(Ordering::Relaxed),
            renders_total: self.renders_total.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            render_errors: self.render_errors.load(Ordering::Relaxed),
            png_bytes_total: self.png_bytes_total.load(Ordering::Relaxed),
            render_avg_ms: render_times.avg_ms(),
            render_last_ms: render_times.last_us as f64 / 1000.0,
            render_min_ms: render_times.min_us as f64 / 1000.0,
            render_max_ms: render_times.max_us as f64 / 1000.0,
        }
    }
}

/// Timer guard for measuring operation duration.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_counts_and_timings() {
        let metrics = MetricsCollector::new();
        metrics.record_request();
        metrics.record_render(2_000, Some(4096)).await;
        metrics.record_render(4_000, Some(1024)).await;
        metrics.record_render(1_000, None).await;

        let snap = metrics.snapshot().await;
        assert_eq!(snap.requests, 1);
        assert_eq!(snap.renders_total, 2);
        assert_eq!(snap.render_errors, 1);
        assert_eq!(snap.png_bytes_total, 5120);
        assert_eq!(snap.render_last_ms, 1.0);
        assert_eq!(snap.render_min_ms, 1.0);
        assert_eq!(snap.render_max_ms, 4.0);
        assert!((snap.render_avg_ms - 7.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_snapshot() {
        let snap = MetricsCollector::new().snapshot().await;
        assert_eq!(snap.renders_total, 0);
        assert_eq!(snap.render_avg_ms, 0.0);
    }

    #[test]
    fn test_validation_failures_counted() {
        let metrics = MetricsCollector::new();
        metrics.record_validation_failure(3);
        assert_eq!(metrics.validation_failures.load(Ordering::Relaxed), 1);
    }
}
