//! Helpers that turn command-line options into engine configuration

use crate::config::ecsls;
use crate::config::suppression::SuppressedRuleSet;
use crate::engine::gitignore::GitignorePatterns;
use crate::engine::path_filter::ExclusionRuleSet;
use crate::error::ConfigError;
use std::path::Path;
use std::time::Duration;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_ISSUES_FOUND: i32 = 2;
pub const EXIT_CHECKER_FAILED: i32 = 3;
pub const EXIT_ERROR: i32 = 4;

/// File the report is copied to with `--emit-report`
pub const REPORT_LOG_FILE: &str = "coding-style-reports.log";

/// Builds the path exclusions for `root`
///
/// Layers, in order: built-in patterns, `ignore_folders`, the tests folder
/// unless `include_tests`, and `<root>/.gitignore` when `use_gitignore`.
///
/// # Errors
///
/// Returns `ConfigError` if `.gitignore` cannot be read or a pattern does not
/// compile.
pub(crate) fn build_exclusions(
    root: &Path,
    ignore_folders: &[String],
    include_tests: bool,
    use_gitignore: bool,
) -> Result<ExclusionRuleSet, ConfigError> {
    let mut builder = ExclusionRuleSet::builder()
        .builtin()
        .folders(ignore_folders)
        .exclude_tests(!include_tests);

    if use_gitignore {
        builder = builder.gitignore(&GitignorePatterns::load(root)?);
    }

    builder.build()
}

/// Merges explicit rule identifiers with the nearest `ecsls.toml` ignore list
///
/// # Errors
///
/// Returns `ConfigError` for an invalid identifier or an unreadable
/// `ecsls.toml`.
pub(crate) fn build_suppressions(
    root: &Path,
    ignore_rules: &[String],
    use_ecsls: bool,
) -> Result<SuppressedRuleSet, ConfigError> {
    let mut suppressed = SuppressedRuleSet::new();
    for list in ignore_rules {
        suppressed.extend_from_csv(list)?;
    }
    if use_ecsls {
        suppressed.extend(ecsls::read_ignore_list(root)?);
    }
    log::debug!("Suppressing {} rule(s)", suppressed.len());
    Ok(suppressed)
}

/// Converts a timeout in seconds
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for negative or non-finite values.
pub(crate) fn parse_timeout(seconds: Option<f64>) -> Result<Option<Duration>, ConfigError> {
    seconds
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidValue {
                field: "timeout".to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}
