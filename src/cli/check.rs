//! Check command implementation
//!
//! This module runs one style check:
//! - Resolves suppressed rules (explicit list and `ecsls.toml`)
//! - Builds the path exclusions and selects the project files
//! - Runs the external checker once over the selection
//! - Filters and counts the checker's report
//! - Optionally copies the report to `coding-style-reports.log`
//! - Formats output (human or JSONL)
//! - Returns the appropriate exit code

use crate::cli::args::{Cli, ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_CHECKER_FAILED, EXIT_ERROR, EXIT_ISSUES_FOUND, EXIT_SUCCESS, REPORT_LOG_FILE,
    build_exclusions, build_suppressions, parse_timeout,
};
use crate::engine::checker::{Checker, ExternalChecker};
use crate::engine::path_filter::select_files;
use crate::engine::report_filter::{FilteredReport, filter_report};
use crate::error::{CheckerError, ConfigError, StyleReportError};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::fs;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use termcolor::StandardStream;

/// Resolved options for one check
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub checker: PathBuf,
    pub ruleset: String,
    pub profile: String,
    pub root: PathBuf,
    pub ignore_rules: Vec<String>,
    pub ignore_folders: Vec<String>,
    pub include_tests: bool,
    pub use_gitignore: bool,
    pub use_ecsls: bool,
    /// Where to copy the report, if anywhere
    pub report_log: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl CheckOptions {
    /// Options with every toggle off, checking `root` with the default profile
    pub fn new(
        checker: impl Into<PathBuf>,
        ruleset: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            checker: checker.into(),
            ruleset: ruleset.into(),
            profile: crate::engine::checker::DEFAULT_PROFILE.to_string(),
            root: root.into(),
            ignore_rules: Vec::new(),
            ignore_folders: Vec::new(),
            include_tests: false,
            use_gitignore: false,
            use_ecsls: false,
            report_log: None,
            timeout: None,
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
        }
    }

    /// Resolves parsed arguments
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unusable timeout.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            checker: cli.checker,
            ruleset: cli.ruleset,
            profile: cli.profile,
            root: cli.path,
            ignore_rules: cli.ignore_rules,
            ignore_folders: cli.ignore_folders,
            include_tests: cli.include_tests,
            use_gitignore: cli.use_gitignore,
            use_ecsls: cli.ecsls,
            report_log: cli.emit_report.then(|| PathBuf::from(REPORT_LOG_FILE)),
            timeout: parse_timeout(cli.timeout)?,
            format: cli.format,
            color: cli.color,
        })
    }

    fn external_checker(&self) -> ExternalChecker {
        ExternalChecker::new(&self.checker, self.ruleset.clone())
            .with_profile(self.profile.clone())
            .with_timeout(self.timeout)
    }
}

/// What a completed check found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub files: Vec<PathBuf>,
    pub report: FilteredReport,
    pub elapsed: Duration,
}

/// Run the check with the external checker named in `options`
///
/// # Returns
///
/// Exit code:
/// - 0: no issues
/// - 2: issues found
/// - 3: the checker failed (no output, could not start, timed out)
/// - 4: configuration or I/O error
pub fn run_check(options: &CheckOptions) -> i32 {
    run_check_with(options, &options.external_checker())
}

/// Run the check with any [`Checker`]
///
/// In human format the header is printed before the checker starts.
pub fn run_check_with<C: Checker>(options: &CheckOptions, checker: &C) -> i32 {
    let result = print_header(options)
        .map_err(StyleReportError::from)
        .and_then(|()| execute(options, checker))
        .and_then(|outcome| print_outcome(options, &outcome).map(|()| outcome));

    match result {
        Ok(outcome) => {
            if outcome.report.is_clean() {
                EXIT_SUCCESS
            } else {
                EXIT_ISSUES_FOUND
            }
        }
        Err(StyleReportError::Checker(CheckerError::NoOutput { stderr })) => {
            eprint!("{}", stderr);
            if !stderr.is_empty() && !stderr.ends_with('\n') {
                eprintln!();
            }
            log::error!("The style checker produced no output");
            EXIT_CHECKER_FAILED
        }
        Err(StyleReportError::Checker(e)) => {
            log::error!("{}", e);
            EXIT_CHECKER_FAILED
        }
        Err(e) => {
            log::error!("{}", e);
            EXIT_ERROR
        }
    }
}

/// Selects files, runs the checker and filters its report
///
/// Nothing is printed; the report log file is written when requested.
pub(crate) fn execute<C: Checker>(
    options: &CheckOptions,
    checker: &C,
) -> Result<CheckOutcome, StyleReportError> {
    let root = options.root.as_path();

    let suppressed = build_suppressions(root, &options.ignore_rules, options.use_ecsls)?;
    let exclusions = build_exclusions(
        root,
        &options.ignore_folders,
        options.include_tests,
        options.use_gitignore,
    )?;

    let started = Instant::now();
    let files = select_files(root, &exclusions)?;
    if files.is_empty() {
        log::warn!("No files found to check under {}", root.display());
    }

    let output = checker.check(&files)?;
    let report = filter_report(&output.stdout, &suppressed)
        .map_err(|_| CheckerError::NoOutput {
            stderr: output.stderr.clone(),
        })?;

    if let Some(path) = &options.report_log {
        write_report_log(path, &report)?;
    }

    Ok(CheckOutcome {
        files,
        report,
        elapsed: started.elapsed(),
    })
}

fn write_report_log(path: &Path, report: &FilteredReport) -> std::io::Result<()> {
    log::debug!("Writing report to {}", path.display());
    fs::write(path, format!("{}\n", report.text()))
}

fn print_header(options: &CheckOptions) -> std::io::Result<()> {
    if options.format != OutputFormat::Human {
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", HumanFormatter::new(&options.root).header())?;
    stdout.flush()
}

fn print_outcome(
    options: &CheckOptions,
    outcome: &CheckOutcome,
) -> Result<(), StyleReportError> {
    let root = options.root.as_path();
    match options.format {
        OutputFormat::Human => {
            let formatter = HumanFormatter::new(root);
            let color = options.color.resolve(std::io::stdout().is_terminal());
            let mut stdout = StandardStream::stdout(color);
            write!(stdout, "{}", formatter.format_report(&outcome.report))?;
            formatter.write_summary(&mut stdout, &outcome.report, outcome.elapsed)?;
        }
        OutputFormat::Jsonl => {
            let formatter = JsonlFormatter::new(root);
            print!(
                "{}",
                formatter.format(&outcome.report, outcome.files.len(), outcome.elapsed)
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::checker::CheckerOutput;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records the files it receives and replies with a canned report
    struct CannedChecker {
        stdout: String,
        stderr: String,
        received: RefCell<Vec<PathBuf>>,
    }

    impl CannedChecker {
        fn new(stdout: &str) -> Self {
            Self {
                stdout: stdout.to_string(),
                stderr: String::new(),
                received: RefCell::new(Vec::new()),
            }
        }
    }

    impl Checker for CannedChecker {
        fn check(&self, files: &[PathBuf]) -> Result<CheckerOutput, CheckerError> {
            self.received.borrow_mut().extend_from_slice(files);
            Ok(CheckerOutput {
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
                status: Some(0),
            })
        }
    }

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("tests")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("src").join("main.c"), "int main;").unwrap();
        fs::write(root.join("tests").join("t.c"), "").unwrap();
        fs::write(root.join(".git").join("HEAD"), "").unwrap();
        temp_dir
    }

    #[test]
    fn test_execute_submits_selected_files() {
        let temp_dir = project();
        let options = CheckOptions::new("unused", "rules", temp_dir.path());
        let checker = CannedChecker::new("a.c:1: MAJOR:C-L3\n");

        let outcome = execute(&options, &checker).unwrap();

        let expected = vec![temp_dir.path().join("src").join("main.c")];
        assert_eq!(*checker.received.borrow(), expected);
        assert_eq!(outcome.files, expected);
        assert_eq!(outcome.report.issue_count(), 1);
    }

    #[test]
    fn test_execute_include_tests() {
        let temp_dir = project();
        let mut options = CheckOptions::new("unused", "rules", temp_dir.path());
        options.include_tests = true;
        let checker = CannedChecker::new("ok\n");

        let outcome = execute(&options, &checker).unwrap();
        assert!(outcome.files.contains(&temp_dir.path().join("tests").join("t.c")));
    }

    #[test]
    fn test_execute_empty_output_is_checker_failure() {
        let temp_dir = project();
        let options = CheckOptions::new("unused", "rules", temp_dir.path());
        let mut checker = CannedChecker::new("");
        checker.stderr = "ruleset not found".to_string();

        match execute(&options, &checker) {
            Err(StyleReportError::Checker(CheckerError::NoOutput { stderr })) => {
                assert_eq!(stderr, "ruleset not found")
            }
            other => panic!("Expected NoOutput, got {:?}", other),
        }
        assert_eq!(run_check_with(&options, &checker), EXIT_CHECKER_FAILED);
    }

    #[test]
    fn test_execute_writes_report_log() {
        let temp_dir = project();
        let log_path = temp_dir.path().join("report.log");
        let mut options = CheckOptions::new("unused", "rules", temp_dir.path());
        options.report_log = Some(log_path.clone());
        options.ignore_rules = vec!["C-G1".to_string()];
        let checker = CannedChecker::new("a.c:1: MAJOR:C-L3\na.c:2: MINOR:C-G1");

        execute(&options, &checker).unwrap();

        let written = fs::read_to_string(log_path).unwrap();
        assert_eq!(written, "a.c:1: MAJOR:C-L3\n");
    }

    #[test]
    fn test_run_check_exit_codes() {
        let temp_dir = project();
        let mut options = CheckOptions::new("unused", "rules", temp_dir.path());
        options.color = ColorChoice::Never;

        let dirty = CannedChecker::new("a.c:1: MAJOR:C-L3");
        assert_eq!(run_check_with(&options, &dirty), EXIT_ISSUES_FOUND);

        let clean = CannedChecker::new("\n");
        assert_eq!(run_check_with(&options, &clean), EXIT_SUCCESS);
    }

    #[test]
    fn test_run_check_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let options = CheckOptions::new("unused", "rules", temp_dir.path().join("missing"));
        let checker = CannedChecker::new("x");
        assert_eq!(run_check_with(&options, &checker), EXIT_ERROR);
        assert!(checker.received.borrow().is_empty());
    }

    #[test]
    fn test_from_cli() {
        use clap::Parser;
        let cli = Cli::parse_from([
            "style-report",
            "vera++",
            "/rules",
            "proj",
            "--emit-report",
            "--timeout",
            "3",
        ]);
        let options = CheckOptions::from_cli(cli).unwrap();
        assert_eq!(options.root, PathBuf::from("proj"));
        assert_eq!(options.report_log, Some(PathBuf::from(REPORT_LOG_FILE)));
        assert_eq!(options.timeout, Some(Duration::from_secs(3)));
    }
}
