//! Checker report filtering and severity counting
//!
//! The checker prints one issue per line, terminated by the rule identifier:
//!
//! ```text
//! ./src/main.c:12: MAJOR:C-L3
//! ```
//!
//! Lines reporting a suppressed rule are dropped, and the issue count is the
//! number of severity-token occurrences in what remains. The count is a raw
//! substring count over the whole text: a line carrying two tokens counts
//! twice.

use crate::config::suppression::SuppressedRuleSet;
use crate::types::Severity;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// The checker printed nothing, which means it failed rather than found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("external checker produced no output")]
pub struct EmptyReport;

/// Occurrences of each severity token in a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCount {
    pub fatal: usize,
    pub major: usize,
    pub minor: usize,
    pub info: usize,
}

impl SeverityCount {
    /// Counts every occurrence of every severity token in `text`
    pub fn from_text(text: &str) -> Self {
        let count = |severity: Severity| text.matches(severity.token()).count();
        Self {
            fatal: count(Severity::Fatal),
            major: count(Severity::Major),
            minor: count(Severity::Minor),
            info: count(Severity::Info),
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Fatal => self.fatal,
            Severity::Major => self.major,
            Severity::Minor => self.minor,
            Severity::Info => self.info,
        }
    }

    /// Total issue count
    pub fn total(&self) -> usize {
        self.fatal + self.major + self.minor + self.info
    }
}

/// A report with suppressed lines removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredReport {
    text: String,
    severities: SeverityCount,
}

impl FilteredReport {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn severities(&self) -> SeverityCount {
        self.severities
    }

    pub fn issue_count(&self) -> usize {
        self.severities.total()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    /// Non-empty report lines, in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().filter(|line| !line.trim().is_empty())
    }
}

/// Removes suppressed lines from `raw_output` and counts the remaining issues
///
/// With no suppressed rules the text is returned untouched; otherwise the
/// surviving lines are joined with `\n` in their original order.
///
/// # Errors
///
/// Returns [`EmptyReport`] when `raw_output` is empty.
pub fn filter_report(
    raw_output: &str,
    suppressed: &SuppressedRuleSet,
) -> Result<FilteredReport, EmptyReport> {
    if raw_output.is_empty() {
        return Err(EmptyReport);
    }

    let text = if suppressed.is_empty() {
        raw_output.to_string()
    } else {
        raw_output
            .lines()
            .filter(|line| !suppressed.is_suppressed(line))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let severities = SeverityCount::from_text(&text);
    Ok(FilteredReport { text, severities })
}

/// Replaces the project root in `text` with `.` for display
pub fn abbreviate_root(text: &str, root: &Path) -> String {
    let root = root.to_string_lossy();
    let root = root.trim_end_matches('/');
    if root.is_empty() || root == "." {
        return text.to_string();
    }
    text.replace(root, ".")
}

/// One checker report line split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine<'a> {
    pub file: &'a str,
    pub line: Option<u32>,
    pub severity: Option<Severity>,
    pub rule: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> ReportLine<'a> {
    /// Splits `file:line:...:RULE`; parts that are absent come back as None
    pub fn parse(text: &'a str) -> Self {
        let mut parts = text.splitn(3, ':');
        let file = parts.next().unwrap_or_default().trim();
        let line = parts.next().and_then(|n| n.trim().parse().ok());
        let rule = match text.rsplit_once(':') {
            Some((_, rule)) if !rule.trim().is_empty() => Some(rule.trim()),
            _ => None,
        };
        Self {
            file,
            line,
            severity: Severity::find_in(text),
            rule,
            text,
        }
    }
}
