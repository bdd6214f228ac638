//! Raster rendering of finance report figures.
//!
//! A report is drawn onto an RGBA canvas:
//! - Income vs expense bars
//! - Expense category pie
//! - Income/expense trend lines
//!
//! and encoded with the crate's own PNG writer.

pub mod axis;
pub mod bar;
pub mod figure;
pub mod panel;
pub mod pie;
pub mod png;
pub mod style;
pub mod text;
pub mod trend;

use thiserror::Error;

pub use figure::{render_report, Figure, FIGURE_DPI, FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN};
pub use style::ChartTheme;

/// Failures while drawing or encoding a figure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Embedded chart font could not be parsed")]
    FontUnavailable,

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<RenderError> for report_common::ReportError {
    fn from(err: RenderError) -> Self {
        report_common::ReportError::RenderError(err.to_string())
    }
}
