//! External checker process tests
//!
//! Each test writes a small shell script standing in for the real checker.

#![cfg(unix)]

mod common;

use common::{
    HANGING_CHECKER, REPORTING_CHECKER, SILENT_CHECKER, WRAPPER_HANGING_CHECKER, write_script,
};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use style_report::CheckerError;
use style_report::engine::{Checker, ExternalChecker};
use tempfile::TempDir;

fn files(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn test_files_are_sent_on_stdin() {
    let bin = TempDir::new().unwrap();
    let script = write_script(bin.path(), "checker", REPORTING_CHECKER);

    let checker = ExternalChecker::new(&script, "/rules");
    let output = assert_ok!(checker.check(&files(&["/p/a.c", "/p/b.c"])));

    assert_eq!(
        output.stdout,
        "/p/a.c:1: MAJOR:C-L3\n/p/a.c:2: MINOR:C-G1\n/p/b.c:1: MAJOR:C-L3\n/p/b.c:2: MINOR:C-G1\n"
    );
    assert_eq!(output.status, Some(0));
}

#[test]
fn test_profile_and_ruleset_are_forwarded() {
    let bin = TempDir::new().unwrap();
    let args_log = bin.path().join("args.log");
    let script = write_script(
        bin.path(),
        "checker",
        &format!(
            "#!/bin/sh\necho \"$*\" > '{}'\ncat > /dev/null\necho\n",
            args_log.display()
        ),
    );

    let checker = ExternalChecker::new(&script, "/usr/local/lib/vera++").with_profile("custom");
    assert_ok!(checker.check(&files(&["a.c"])));

    let args = fs::read_to_string(&args_log).unwrap();
    assert_eq!(args.trim_end(), "--profile custom --root /usr/local/lib/vera++");
}

#[test]
fn test_stderr_and_status_are_captured() {
    let bin = TempDir::new().unwrap();
    let script = write_script(bin.path(), "checker", SILENT_CHECKER);

    let output = assert_ok!(ExternalChecker::new(&script, "/rules").check(&files(&["a.c"])));

    assert_eq!(output.stdout, "");
    assert_eq!(output.stderr, "vera++: cannot open ruleset\n");
    assert_eq!(output.status, Some(1));
}

#[test]
fn test_checker_that_ignores_large_input() {
    let bin = TempDir::new().unwrap();
    let script = write_script(bin.path(), "checker", SILENT_CHECKER);

    // Enough paths to overflow a pipe buffer the checker never drains
    let many: Vec<PathBuf> = (0..20_000)
        .map(|i| PathBuf::from(format!("/project/src/module_{i}/file_{i}.c")))
        .collect();

    let output = assert_ok!(ExternalChecker::new(&script, "/rules").check(&many));
    assert_eq!(output.stdout, "");
}

#[test]
fn test_no_files_still_runs_checker() {
    let bin = TempDir::new().unwrap();
    let script = write_script(bin.path(), "checker", REPORTING_CHECKER);

    let output = assert_ok!(ExternalChecker::new(&script, "/rules").check(&[]));
    assert_eq!(output.stdout, "");
    assert_eq!(output.status, Some(0));
}

#[test]
fn test_missing_program_is_a_spawn_error() {
    let bin = TempDir::new().unwrap();
    let checker = ExternalChecker::new(bin.path().join("missing"), "/rules");

    match checker.check(&files(&["a.c"])) {
        Err(CheckerError::Spawn { program, .. }) => {
            assert_eq!(program, bin.path().join("missing"))
        }
        other => panic!("Expected Spawn error, got {:?}", other),
    }
}

#[test]
fn test_timeout_kills_the_checker() {
    let bin = TempDir::new().unwrap();
    let script = write_script(bin.path(), "checker", HANGING_CHECKER);

    let checker =
        ExternalChecker::new(&script, "/rules").with_timeout(Some(Duration::from_millis(200)));
    let started = Instant::now();
    let result = checker.check(&files(&["a.c"]));

    assert!(matches!(result, Err(CheckerError::Timeout { .. })));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_timeout_is_not_held_up_by_leftover_processes() {
    let bin = TempDir::new().unwrap();
    let script = write_script(bin.path(), "checker", WRAPPER_HANGING_CHECKER);

    let checker =
        ExternalChecker::new(&script, "/rules").with_timeout(Some(Duration::from_millis(300)));
    let started = Instant::now();
    let result = checker.check(&files(&["a.c"]));

    assert!(matches!(result, Err(CheckerError::Timeout { .. })));
    assert!(started.elapsed() < Duration::from_secs(4));
}
