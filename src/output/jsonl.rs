#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line:
//! 1. One issue record per kept report line, in report order
//! 2. One summary record

use crate::engine::report_filter::{FilteredReport, ReportLine, SeverityCount, abbreviate_root};
use crate::types::Severity;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// JSONL output formatter
pub struct JsonlFormatter<'a> {
    root: &'a Path,
}

#[derive(Debug, Serialize)]
struct IssueRecord<'r> {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: &'r str,
    line: Option<u32>,
    severity: Option<Severity>,
    rule: Option<&'r str>,
    text: &'r str,
}

impl<'r> From<ReportLine<'r>> for IssueRecord<'r> {
    fn from(line: ReportLine<'r>) -> Self {
        Self {
            record_type: "issue",
            file: line.file,
            line: line.line,
            severity: line.severity,
            rule: line.rule,
            text: line.text,
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    files: usize,
    issues: usize,
    #[serde(flatten)]
    severities: SeverityCount,
    elapsed_secs: f64,
}

impl<'a> JsonlFormatter<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Format the report as JSONL
    ///
    /// `files` is the number of files submitted to the checker.
    pub fn format(&self, report: &FilteredReport, files: usize, elapsed: Duration) -> String {
        let mut output = String::new();

        for line in report.lines() {
            let display = abbreviate_root(line, self.root);
            let record = IssueRecord::from(ReportLine::parse(&display));
            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        let summary = SummaryRecord {
            record_type: "summary",
            files,
            issues: report.issue_count(),
            severities: report.severities(),
            elapsed_secs: elapsed.as_secs_f64(),
        };
        if let Ok(json) = serde_json::to_string(&summary) {
            output.push_str(&json);
            output.push('\n');
        }

        output
    }
}
