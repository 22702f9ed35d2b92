//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when standard output is a terminal
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl ColorChoice {
    /// Resolves the choice for standard output
    pub fn resolve(self, is_terminal: bool) -> termcolor::ColorChoice {
        match self {
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
            ColorChoice::Auto if is_terminal => termcolor::ColorChoice::Auto,
            ColorChoice::Auto => termcolor::ColorChoice::Never,
        }
    }
}

/// style-report command line
#[derive(Parser, Debug)]
#[command(name = "style-report")]
#[command(about = "Run a coding-style checker over a project and report its findings")]
#[command(version)]
pub struct Cli {
    /// Style checker executable
    pub checker: PathBuf,

    /// Ruleset path forwarded to the checker
    pub ruleset: String,

    /// Project to check
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Use the ignore list from the nearest ecsls.toml
    #[arg(long)]
    pub ecsls: bool,

    /// Rules to ignore, separated by commas
    #[arg(long, value_name = "RULES", value_delimiter = ',')]
    pub ignore_rules: Vec<String>,

    /// Folders to ignore within the project, separated by commas
    #[arg(long, value_name = "FOLDERS", value_delimiter = ',')]
    pub ignore_folders: Vec<String>,

    /// Check files inside tests folders
    #[arg(long)]
    pub include_tests: bool,

    /// Exclude every file and folder listed in the project's .gitignore
    #[arg(long)]
    pub use_gitignore: bool,

    /// Also write the report to coding-style-reports.log
    #[arg(long)]
    pub emit_report: bool,

    /// Profile passed to the checker
    #[arg(long, default_value = crate::engine::checker::DEFAULT_PROFILE)]
    pub profile: String,

    /// Kill the checker after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Output format
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Output coloring
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}
