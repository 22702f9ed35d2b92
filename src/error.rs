//! Error types for style-report
//!
//! This module defines the error types used throughout style-report, following
//! a hierarchical structure with specific error variants for different
//! error categories.

use std::path::PathBuf;
use std::time::Duration;

use crate::engine::file_walker::FileWalkerError;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML in a configuration file
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// An exclusion pattern failed to compile
    #[error("Invalid exclusion pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised while running the external checker
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// The checker program could not be started
    #[error("Failed to start checker '{}': {source}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    /// I/O error while talking to the checker
    #[error("I/O error while running checker: {0}")]
    Io(#[from] std::io::Error),

    /// The checker did not finish in time and was killed
    #[error("Checker '{}' did not finish within {}s", program.display(), timeout.as_secs_f64())]
    Timeout { program: PathBuf, timeout: Duration },

    /// The checker produced no report at all
    #[error("Checker produced no output")]
    NoOutput { stderr: String },

    /// A helper thread exchanging data with the checker panicked
    #[error("Checker {0} thread panicked")]
    Panicked(&'static str),
}

/// Top-level error type for style-report
#[derive(Debug, thiserror::Error)]
pub enum StyleReportError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Checker error
    #[error("Checker error: {0}")]
    Checker(#[from] CheckerError),

    /// File discovery error
    #[error("File walker error: {0}")]
    FileWalker(#[from] FileWalkerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
