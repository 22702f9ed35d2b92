//! File selection, checker execution and report filtering

pub mod checker;
pub mod file_walker;
pub mod gitignore;
pub mod path_filter;
pub mod report_filter;

pub use checker::{Checker, CheckerOutput, ExternalChecker};
pub use path_filter::{ExclusionRuleSet, ExclusionRuleSetBuilder, select_files};
pub use report_filter::{EmptyReport, FilteredReport, SeverityCount, filter_report};
