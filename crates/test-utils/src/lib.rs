//! Shared test utilities for the finance reporting workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Canned chart request payloads
//! - Generators for larger synthetic requests
//! - PNG inspection helpers
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, decode_png};
//! ```

pub mod fixtures;
pub mod generators;
pub mod png;

pub use generators::*;
pub use png::*;
