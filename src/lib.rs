#![forbid(unsafe_code)]

//! style-report: coding-style reports from an external checker
//!
//! style-report selects the source files of a project, submits them to an
//! external style checker, and filters and counts the checker's report.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod types;

// Re-export error types for convenient access
pub use error::{CheckerError, ConfigError, StyleReportError};

// Re-export core domain types for convenient access
pub use types::{ExclusionPattern, RuleId, Severity};
