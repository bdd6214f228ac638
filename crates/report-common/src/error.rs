//! Error types for the finance reporting services.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias using ReportError.
pub type ReportResult<T> = Result<T, ReportError>;

/// One segment of a field location: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for LocSegment {
    fn from(s: &str) -> Self {
        LocSegment::Field(s.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(i: usize) -> Self {
        LocSegment::Index(i)
    }
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Field(s) => write!(f, "{}", s),
            LocSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Path to the offending value, rooted at `body`.
    pub loc: Vec<LocSegment>,
    /// Human-readable message
    pub msg: String,
    /// Machine-readable error code
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn new(loc: Vec<LocSegment>, kind: &'static str, msg: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind,
        }
    }

    /// Dotted form of the location, e.g. `body.trend.0.income`.
    pub fn path(&self) -> String {
        self.loc
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path(), self.msg, self.kind)
    }
}

/// Primary error type for report operations.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Request validation failed: {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ReportError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ReportError::Validation(_) => 422,
            ReportError::RenderError(_) | ReportError::InternalError(_) => 500,
        }
    }

    /// Field errors carried by a validation failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ReportError::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// JSON body returned to HTTP clients.
    pub fn detail(&self) -> serde_json::Value {
        match self {
            ReportError::Validation(errors) => serde_json::json!({ "detail": errors }),
            other => serde_json::json!({ "detail": other.to_string() }),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::InternalError(format!("JSON error: {}", err))
    }
}
