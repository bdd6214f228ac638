//! Command line and environment configuration.

use clap::Parser;
use tracing::Level;

/// Default request body cap: 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(name = "reporting-api")]
#[command(about = "Finance report chart rendering service")]
pub struct Args {
    /// Listen address
    #[arg(short, long, env = "REPORTING_LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: String,

    /// Log level
    #[arg(long, env = "REPORTING_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "TOKIO_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "REPORTING_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Args {
    /// Tracing level for `--log-level`; unknown names fall back to info.
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}
