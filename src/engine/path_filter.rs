//! Path selection
//!
//! An [`ExclusionRuleSet`] is built once from the layered configuration
//! (built-in patterns, folder names, the tests toggle, translated gitignore
//! lines) and then decides which discovered files are submitted to the
//! checker.
//!
//! Patterns are matched against the *match subject* of a path: the path made
//! relative to the project root, with `/` separators and a leading `/`
//! (`/src/main.c`). A pattern excludes a path when it matches the subject from
//! its first character; it does not have to consume the whole subject.

use crate::engine::file_walker::{FileWalkerError, discover_files};
use crate::engine::gitignore::GitignorePatterns;
use crate::error::ConfigError;
use crate::types::ExclusionPattern;
use regex::{Regex, RegexSet};
use std::path::{Component, Path, PathBuf};

/// Build, cache, VCS and editor artifacts that are never checked
pub const BUILTIN_EXCLUSIONS: &[&str] = &[
    r".*/\.build/.*",
    r".*/\.cache/.*",
    r".*/\.direnv/.*",
    r".*/\.git/.*",
    r".*/\.idea/.*",
    r".*/\.vscode/.*",
    r"/bonus/.*",
    r".*/result/.*",
    r".*/Doxyfile",
];

/// Folder skipped unless tests are included
pub const TESTS_FOLDER: &str = "tests";

/// Renders `path` as a match subject relative to `root`
///
/// Paths outside `root` keep all of their components.
pub fn match_subject(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut subject = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                subject.push('/');
                subject.push_str(&part.to_string_lossy());
            }
            Component::ParentDir => subject.push_str("/.."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    if subject.is_empty() {
        subject.push('/');
    }
    subject
}

/// Pattern excluding every path that contains `/<name>/`
fn folder_pattern(name: &str) -> Option<ExclusionPattern> {
    let name = name.trim().trim_matches('/');
    if name.is_empty() {
        return None;
    }
    Some(ExclusionPattern::new(format!(".*/{}/.*", regex::escape(name))))
}

/// Incremental builder for an [`ExclusionRuleSet`]
#[derive(Debug, Clone, Default)]
pub struct ExclusionRuleSetBuilder {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionRuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds [`BUILTIN_EXCLUSIONS`]
    pub fn builtin(mut self) -> Self {
        self.patterns
            .extend(BUILTIN_EXCLUSIONS.iter().copied().map(ExclusionPattern::from));
        self
    }

    /// Excludes every path containing `/<name>/`
    ///
    /// Blank names are ignored.
    pub fn folder(mut self, name: &str) -> Self {
        if let Some(pattern) = folder_pattern(name) {
            self.patterns.push(pattern);
        }
        self
    }

    pub fn folders<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.folder(name.as_ref()))
    }

    /// Excludes `tests` folders when `exclude` is true
    pub fn exclude_tests(self, exclude: bool) -> Self {
        if exclude {
            self.folder(TESTS_FOLDER)
        } else {
            self
        }
    }

    /// Adds patterns translated from a `.gitignore`
    pub fn gitignore(mut self, gitignore: &GitignorePatterns) -> Self {
        self.patterns.extend(gitignore.patterns().iter().cloned());
        self
    }

    /// Adds a raw regular-expression pattern
    pub fn pattern(mut self, pattern: impl Into<ExclusionPattern>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Compiles the collected patterns
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` naming the first pattern that
    /// fails to compile.
    pub fn build(self) -> Result<ExclusionRuleSet, ConfigError> {
        let anchored: Vec<String> = self.patterns.iter().map(|p| p.anchored()).collect();
        let set = RegexSet::new(&anchored).map_err(|set_error| {
            // Name the culprit; RegexSet errors do not say which pattern failed.
            self.patterns
                .iter()
                .find_map(|pattern| {
                    Regex::new(&pattern.anchored())
                        .err()
                        .map(|e| ConfigError::InvalidPattern {
                            pattern: pattern.as_str().to_string(),
                            message: e.to_string(),
                        })
                })
                .unwrap_or_else(|| ConfigError::InvalidPattern {
                    pattern: "<pattern set>".to_string(),
                    message: set_error.to_string(),
                })
        })?;

        log::debug!("Compiled {} exclusion pattern(s)", self.patterns.len());
        Ok(ExclusionRuleSet {
            patterns: self.patterns,
            set,
        })
    }
}

/// An immutable set of path exclusion patterns
///
/// A path is excluded iff its match subject matches any pattern.
#[derive(Debug, Clone)]
pub struct ExclusionRuleSet {
    patterns: Vec<ExclusionPattern>,
    set: RegexSet,
}

impl ExclusionRuleSet {
    pub fn builder() -> ExclusionRuleSetBuilder {
        ExclusionRuleSetBuilder::new()
    }

    /// The patterns in the order they were added
    pub fn patterns(&self) -> &[ExclusionPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if `subject` matches any pattern
    pub fn is_excluded(&self, subject: &str) -> bool {
        self.set.is_match(subject)
    }

    /// The first pattern (in insertion order) that matches `subject`
    pub fn first_match(&self, subject: &str) -> Option<&ExclusionPattern> {
        self.set
            .matches(subject)
            .iter()
            .next()
            .map(|index| &self.patterns[index])
    }

    /// Keeps the candidates that are not excluded, preserving their order
    pub fn select<I>(&self, root: &Path, candidates: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        candidates
            .into_iter()
            .filter(|path| {
                let subject = match_subject(root, path);
                match self.first_match(&subject) {
                    Some(pattern) => {
                        log::debug!("Excluded {} (matched {})", path.display(), pattern);
                        false
                    }
                    None => true,
                }
            })
            .collect()
    }
}

/// Discovers the regular files under `root` and keeps those not excluded
///
/// # Errors
///
/// Fails when `root` is not an accessible directory.
pub fn select_files(
    root: &Path,
    exclusions: &ExclusionRuleSet,
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let discovered = discover_files(root)?;
    let total = discovered.len();
    let selected = exclusions.select(root, discovered);
    log::debug!(
        "Selected {} of {} file(s) under {}",
        selected.len(),
        total,
        root.display()
    );
    Ok(selected)
}
