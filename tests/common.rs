//! Test utilities for style-report integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Checker that reports one major and one minor issue per submitted file
pub const REPORTING_CHECKER: &str = r#"#!/bin/sh
while IFS= read -r file || [ -n "$file" ]; do
    echo "$file:1: MAJOR:C-L3"
    echo "$file:2: MINOR:C-G1"
done
"#;

/// Checker that prints nothing on stdout and explains itself on stderr
pub const SILENT_CHECKER: &str = r#"#!/bin/sh
echo "vera++: cannot open ruleset" >&2
exit 1
"#;

/// Checker that writes a single blank line
pub const CLEAN_CHECKER: &str = r#"#!/bin/sh
cat > /dev/null
echo
"#;

/// Checker that never finishes on its own
pub const HANGING_CHECKER: &str = r#"#!/bin/sh
exec sleep 30
"#;

/// Checker that leaves a child process holding its output pipes
pub const WRAPPER_HANGING_CHECKER: &str = r#"#!/bin/sh
sleep 8
echo "late"
"#;

/// A temporary project tree
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Writes `content` at `relative`, creating parent directories
    pub fn create_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// The tree used by most scenarios: sources, a tests folder, and tool noise
    pub fn with_c_sources() -> Self {
        let project = Self::new();
        project.create_file("src/main.c", "int main(void) { return 0; }\n");
        project.create_file("src/utils.c", "void f(void) {}\n");
        project.create_file("include/utils.h", "void f(void);\n");
        project.create_file("tests/test_main.c", "\n");
        project.create_file(".git/HEAD", "ref: refs/heads/main\n");
        project.create_file(".vscode/settings.json", "{}\n");
        project.create_file("bonus/extra.c", "\n");
        project.create_file("Doxyfile", "\n");
        project
    }
}

/// Writes an executable shell script named `name` into `dir`
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write script");
    let mut permissions = fs::metadata(&path)
        .expect("Failed to stat script")
        .permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).expect("Failed to chmod script");
    path
}
