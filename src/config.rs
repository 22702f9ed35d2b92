//! Configuration sources: `ecsls.toml` lookup and rule suppression

pub mod ecsls;
pub mod suppression;

pub use ecsls::{ECSLS_FILE_NAME, EcslsConfig, ReportsSection};
pub use suppression::SuppressedRuleSet;
