#![forbid(unsafe_code)]

//! Core domain types for style-report
//!
//! This module defines the fundamental types shared by the path filter and
//! the report filter.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Severity tokens emitted by the external checker
///
/// The order of [`Severity::ALL`] is the order used for counting and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Major,
    Minor,
    Info,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 4] = [
        Severity::Fatal,
        Severity::Major,
        Severity::Minor,
        Severity::Info,
    ];

    /// The token as it appears in checker output
    pub fn token(&self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Major => "MAJOR",
            Severity::Minor => "MINOR",
            Severity::Info => "INFO",
        }
    }

    /// Finds the first severity token contained in `text`, in [`Severity::ALL`] order
    pub fn find_in(text: &str) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|severity| text.contains(severity.token()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A validated rule identifier
///
/// Rule IDs terminate checker report lines (`...:C-L3`). They must be non-empty
/// and may not contain whitespace or `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleId(String);

impl RuleId {
    /// Creates a new RuleId, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            return None;
        }
        if id.chars().any(|c| c.is_whitespace() || c == ':') {
            return None;
        }
        Some(RuleId(id))
    }

    /// Returns the rule ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets rule sets be queried with the tail of a report line.
impl Borrow<str> for RuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RuleId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleId::new(value.clone()).ok_or_else(|| format!("Invalid rule ID '{}'", value))
    }
}

impl From<RuleId> for String {
    fn from(rule_id: RuleId) -> Self {
        rule_id.0
    }
}

/// A regular-expression source used to exclude paths
///
/// Patterns are matched against the match subject of a path (see
/// [`crate::engine::path_filter::match_subject`]), anchored at its start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionPattern(String);

impl ExclusionPattern {
    /// Creates a new ExclusionPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        ExclusionPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The pattern wrapped so that it only matches from the start of a subject
    pub fn anchored(&self) -> String {
        format!("^(?:{})", self.0)
    }
}

impl fmt::Display for ExclusionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExclusionPattern {
    fn from(pattern: String) -> Self {
        ExclusionPattern(pattern)
    }
}

impl From<&str> for ExclusionPattern {
    fn from(pattern: &str) -> Self {
        ExclusionPattern(pattern.to_string())
    }
}
