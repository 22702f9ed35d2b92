//! Suppressed rule identifiers
//!
//! Rule suppression is independent from path exclusion: it removes lines from
//! the checker's report, never files from the checker's input.

use crate::error::ConfigError;
use crate::types::RuleId;
use std::collections::BTreeSet;

/// The set of rules whose report lines are dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressedRuleSet {
    rules: BTreeSet<RuleId>,
}

impl SuppressedRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses comma-separated identifiers such as `C-O1,C-G8`
    ///
    /// Blank entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an entry that is not a valid
    /// rule identifier.
    pub fn from_csv(list: &str) -> Result<Self, ConfigError> {
        let mut set = Self::new();
        set.extend_from_csv(list)?;
        Ok(set)
    }

    /// Adds the comma-separated identifiers of `list`
    ///
    /// # Errors
    ///
    /// See [`SuppressedRuleSet::from_csv`].
    pub fn extend_from_csv(&mut self, list: &str) -> Result<(), ConfigError> {
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let rule = RuleId::new(entry).ok_or_else(|| ConfigError::InvalidValue {
                field: "ignore-rules".to_string(),
                message: format!("'{}' is not a valid rule identifier", entry),
            })?;
            self.rules.insert(rule);
        }
        Ok(())
    }

    pub fn insert(&mut self, rule: RuleId) -> bool {
        self.rules.insert(rule)
    }

    pub fn contains(&self, rule: &RuleId) -> bool {
        self.rules.contains(rule)
    }

    /// Returns true if `line` ends with `:<rule>` for a suppressed rule
    ///
    /// Rule identifiers contain no `:`, so only the text after the last `:`
    /// needs to be looked up.
    pub fn is_suppressed(&self, line: &str) -> bool {
        line.rsplit_once(':')
            .is_some_and(|(_, tail)| self.rules.contains(tail))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleId> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Extend<RuleId> for SuppressedRuleSet {
    fn extend<T: IntoIterator<Item = RuleId>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}

impl FromIterator<RuleId> for SuppressedRuleSet {
    fn from_iter<T: IntoIterator<Item = RuleId>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
