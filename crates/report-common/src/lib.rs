//! Common types shared across the finance reporting services.

pub mod error;
pub mod request;
pub mod validation;

pub use error::{FieldError, LocSegment, ReportError, ReportResult};
pub use request::{CategoryPoint, ChartRequest, Period, TrendPoint};
pub use validation::validate_chart_request;
