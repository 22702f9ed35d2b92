#![forbid(unsafe_code)]

//! Human-readable output
//!
//! ```text
//! Running norm in /home/me/project
//! ./src/main.c:12: MAJOR:C-L3
//! ./src/main.c:40: MINOR:C-G1
//! Found 2 issues
//! Ran in 0.412s
//! ```

use crate::engine::report_filter::{FilteredReport, abbreviate_root};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use termcolor::{Color, ColorSpec, WriteColor};

/// Formats a filtered report for a terminal
pub struct HumanFormatter<'a> {
    root: &'a Path,
}

impl<'a> HumanFormatter<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Line announcing the checked directory
    pub fn header(&self) -> String {
        format!("Running norm in {}\n", self.root.display())
    }

    /// The report with the project root shortened to `.`
    pub fn format_report(&self, report: &FilteredReport) -> String {
        let text = abbreviate_root(report.text(), self.root);
        if text.is_empty() || text.ends_with('\n') {
            text
        } else {
            text + "\n"
        }
    }

    /// Issue count and elapsed time
    pub fn format_summary(&self, report: &FilteredReport, elapsed: Duration) -> String {
        format!(
            "{}\nRan in {:.3}s\n",
            issue_line(report),
            elapsed.as_secs_f64()
        )
    }

    /// Writes the summary, coloring the issue count when `out` supports it
    pub fn write_summary<W: WriteColor>(
        &self,
        out: &mut W,
        report: &FilteredReport,
        elapsed: Duration,
    ) -> io::Result<()> {
        let color = if report.is_clean() {
            Color::Green
        } else {
            Color::Red
        };
        out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(out, "{}", issue_line(report))?;
        out.reset()?;
        writeln!(out)?;
        writeln!(out, "Ran in {:.3}s", elapsed.as_secs_f64())
    }
}

fn issue_line(report: &FilteredReport) -> String {
    format!("Found {} issues", report.issue_count())
}
