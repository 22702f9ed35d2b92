//! Gitignore to exclusion-pattern translation
//!
//! Each usable `.gitignore` line is compiled into a regular-expression source
//! that the path filter matches against root-relative match subjects. The
//! compiler works on explicit glob tokens:
//!
//! - `*` (or a run of them) matches any sequence of characters
//! - `**/` at the start of a path segment matches zero or more directories
//! - `?` matches a single character other than `/`
//! - `.` matches a literal dot
//! - `[...]` is a bracket expression, kept as a character class
//! - `\x` is the literal `x`
//!
//! Every other character is matched literally.

use crate::types::ExclusionPattern;
use std::path::Path;

/// Name of the ignore file read from the project root
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// One lexical unit of a gitignore glob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobToken {
    /// `*`, `**`, ...
    Star,
    /// `**/` opening a path segment
    AnyDirs,
    /// `?`
    AnyChar,
    /// `.`
    Dot,
    /// `[...]`; `body` excludes the brackets and the negation marker
    Bracket { negated: bool, body: String },
    /// Any other character, possibly escaped with `\`
    Literal(char),
}

/// Splits a glob into tokens
pub fn tokenize(glob: &str) -> Vec<GlobToken> {
    let chars: Vec<char> = glob.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                let run_start = i;
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                let opens_segment = run_start == 0 || chars[run_start - 1] == '/';
                if i - run_start >= 2 && opens_segment && chars.get(i) == Some(&'/') {
                    tokens.push(GlobToken::AnyDirs);
                    i += 1;
                } else {
                    tokens.push(GlobToken::Star);
                }
                continue;
            }
            '?' => tokens.push(GlobToken::AnyChar),
            '.' => tokens.push(GlobToken::Dot),
            '\\' => match chars.get(i + 1) {
                Some(&escaped) => {
                    tokens.push(GlobToken::Literal(escaped));
                    i += 1;
                }
                None => tokens.push(GlobToken::Literal('\\')),
            },
            '[' => match scan_bracket(&chars, i) {
                Some((token, end)) => {
                    tokens.push(token);
                    i = end;
                }
                None => tokens.push(GlobToken::Literal('[')),
            },
            c => tokens.push(GlobToken::Literal(c)),
        }
        i += 1;
    }

    tokens
}

/// Scans a bracket expression opening at `start`
///
/// Returns the token and the index of the closing `]`, or None when the
/// bracket is never closed.
fn scan_bracket(chars: &[char], start: usize) -> Option<(GlobToken, usize)> {
    let mut i = start + 1;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    let mut body = String::new();
    // A `]` right after the opening bracket is a member, not the terminator.
    if chars.get(i) == Some(&']') {
        body.push(']');
        i += 1;
    }

    while i < chars.len() {
        match chars[i] {
            ']' => return Some((GlobToken::Bracket { negated, body }, i)),
            '\\' if i + 1 < chars.len() => {
                body.push('\\');
                body.push(chars[i + 1]);
                i += 2;
                continue;
            }
            c => body.push(c),
        }
        i += 1;
    }
    None
}

/// Renders a bracket body as a regex class body
fn render_class_body(body: &str, out: &mut String) {
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            // Characters with a special meaning inside a regex class.
            '[' | ']' | '&' | '~' | '^' => {
                out.push('\\');
                out.push(c);
            }
            // `.` is already literal inside a class.
            c => out.push(c),
        }
    }
}

/// Compiles a glob into a regular-expression source, without scoping
pub fn compile_glob(glob: &str) -> String {
    let mut out = String::new();
    for token in tokenize(glob) {
        match token {
            GlobToken::Star => out.push_str(".*"),
            GlobToken::AnyDirs => out.push_str("(?:.*/)?"),
            GlobToken::AnyChar => out.push_str("[^/]"),
            GlobToken::Dot => out.push_str(r"\."),
            GlobToken::Bracket { negated, body } => {
                out.push('[');
                if negated {
                    out.push('^');
                }
                render_class_body(&body, &mut out);
                out.push(']');
            }
            GlobToken::Literal(c) => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out
}

/// Translates one `.gitignore` line into a root-scoped exclusion pattern
///
/// Returns None for blank lines, comments, a bare `/`, and negations
/// (`!pattern`), which cannot be expressed as an exclusion.
pub fn translate_line(line: &str) -> Option<ExclusionPattern> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line.starts_with('!') {
        log::debug!("Skipping gitignore negation '{}'", line);
        return None;
    }

    let pattern = match line.strip_prefix('/') {
        Some("") => {
            log::debug!("Skipping gitignore line '/' that names no path");
            return None;
        }
        Some(anchored) => format!("/{}", compile_glob(anchored)),
        None => format!(".*/{}", compile_glob(line)),
    };
    Some(ExclusionPattern::new(pattern))
}

/// Exclusion patterns translated from a `.gitignore` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitignorePatterns {
    patterns: Vec<ExclusionPattern>,
}

impl GitignorePatterns {
    /// Translates the content of a `.gitignore` file
    pub fn parse(content: &str) -> Self {
        Self {
            patterns: content.lines().filter_map(translate_line).collect(),
        }
    }

    /// Loads `<root>/.gitignore`
    ///
    /// A missing file yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read.
    pub fn load(root: &Path) -> std::io::Result<Self> {
        let path = root.join(GITIGNORE_FILE_NAME);
        if !path.is_file() {
            log::debug!("No {} found at {}", GITIGNORE_FILE_NAME, path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let patterns = Self::parse(&content);
        log::debug!(
            "Translated {} pattern(s) from {}",
            patterns.len(),
            path.display()
        );
        Ok(patterns)
    }

    pub fn patterns(&self) -> &[ExclusionPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
