//! Nearest-ancestor `ecsls.toml` lookup
//!
//! Only the `reports.ignore` list is read; every other key belongs to other
//! tools sharing the file and is ignored.
//!
//! ```toml
//! [reports]
//! ignore = ["C-O1", "C-G8"]
//! ```

use crate::error::ConfigError;
use crate::types::RuleId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for in the project root and its ancestors
pub const ECSLS_FILE_NAME: &str = "ecsls.toml";

/// The subset of `ecsls.toml` used by style-report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcslsConfig {
    #[serde(default)]
    pub reports: ReportsSection,
}

/// `[reports]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportsSection {
    /// Rule identifiers to suppress
    #[serde(default)]
    pub ignore: Vec<RuleId>,
}

impl EcslsConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

/// Finds the closest `ecsls.toml` at or above `start`
///
/// The search visits the absolute form of `start` and then each of its
/// ancestors once, so it is bounded by the depth of the path.
///
/// # Errors
///
/// Returns an I/O error only if `start` cannot be made absolute.
pub fn find_nearest(start: &Path) -> std::io::Result<Option<PathBuf>> {
    let start = std::path::absolute(start)?;
    Ok(start
        .ancestors()
        .map(|dir| dir.join(ECSLS_FILE_NAME))
        .find(|candidate| candidate.is_file()))
}

/// Reads `reports.ignore` from the nearest `ecsls.toml`
///
/// No file found resolves to an empty list.
///
/// # Errors
///
/// Returns `ConfigError` if the file found cannot be read or parsed.
pub fn read_ignore_list(start: &Path) -> Result<Vec<RuleId>, ConfigError> {
    match find_nearest(start)? {
        Some(path) => {
            log::debug!("Using rule ignore list from {}", path.display());
            Ok(EcslsConfig::load(&path)?.reports.ignore)
        }
        None => {
            log::debug!(
                "No {} found above {}",
                ECSLS_FILE_NAME,
                start.display()
            );
            Ok(Vec::new())
        }
    }
}
