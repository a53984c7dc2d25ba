//! Detector configuration.
//!
//! There is no configuration file: a [`DetectorConfig`] is assembled in code
//! through [`DetectorConfigBuilder`], validated once, and shared read-only by
//! every file of a run.

use std::collections::BTreeSet;

/// Default minimum tab depth that flags a function.
pub const DEFAULT_INDENT_LIMIT: usize = 4;

/// Default minimum number of enumerators an enum must declare.
pub const DEFAULT_ENUM_ELEMENT_MIN: usize = 3;

/// Which rules run, plus the numeric thresholds they read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Flag functions whose deepest line has at least this many leading tabs.
    pub indent_limit: usize,
    /// Flag enums with fewer enumerators than this.
    pub enum_element_min: usize,
    disabled: BTreeSet<String>,
    only: Option<BTreeSet<String>>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            indent_limit: DEFAULT_INDENT_LIMIT,
            enum_element_min: DEFAULT_ENUM_ELEMENT_MIN,
            disabled: BTreeSet::new(),
            only: None,
        }
    }
}

impl DetectorConfig {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::default()
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        if self.disabled.contains(rule_name) {
            return false;
        }
        self.only
            .as_ref()
            .map_or(true, |only| only.contains(rule_name))
    }

    /// Every rule name the configuration refers to explicitly.
    pub fn referenced_rules(&self) -> impl Iterator<Item = &str> {
        self.disabled
            .iter()
            .chain(self.only.iter().flatten())
            .map(String::as_str)
    }
}

/// Builder for [`DetectorConfig`].
#[derive(Debug, Clone)]
pub struct DetectorConfigBuilder {
    indent_limit: i64,
    enum_element_min: i64,
    disabled: BTreeSet<String>,
    only: Option<BTreeSet<String>>,
}

impl Default for DetectorConfigBuilder {
    fn default() -> Self {
        Self {
            indent_limit: threshold_default(DEFAULT_INDENT_LIMIT),
            enum_element_min: threshold_default(DEFAULT_ENUM_ELEMENT_MIN),
            disabled: BTreeSet::new(),
            only: None,
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn threshold_default(value: usize) -> i64 {
    value as i64
}

impl DetectorConfigBuilder {
    /// Sets the indentation threshold.
    #[must_use]
    pub fn indent_limit(mut self, limit: i64) -> Self {
        self.indent_limit = limit;
        self
    }

    /// Sets the minimum enumerator count.
    #[must_use]
    pub fn enum_element_min(mut self, min: i64) -> Self {
        self.enum_element_min = min;
        self
    }

    /// Disables one rule by name.
    #[must_use]
    pub fn disable(mut self, rule_name: impl Into<String>) -> Self {
        self.disabled.insert(rule_name.into());
        self
    }

    /// Restricts the run to the given rule names.
    #[must_use]
    pub fn enable_only<I, S>(mut self, rule_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(rule_names.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the thresholds and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] if a threshold is zero or
    /// negative.
    pub fn build(self) -> Result<DetectorConfig, ConfigError> {
        Ok(DetectorConfig {
            indent_limit: positive("indent_limit", self.indent_limit)?,
            enum_element_min: positive("enum_element_min", self.enum_element_min)?,
            disabled: self.disabled,
            only: self.only,
        })
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize, ConfigError> {
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidThreshold { name, value }),
    }
}

/// Configuration errors. All of them are fatal before any file is read.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric threshold is out of range.
    #[error("invalid {name}: {value} (must be a positive integer)")]
    InvalidThreshold {
        /// Threshold name.
        name: &'static str,
        /// Rejected value.
        value: i64,
    },

    /// The configuration names a rule that is not registered.
    #[error("unknown rule: {name}")]
    UnknownRule {
        /// Rule name as given.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.indent_limit, 4);
        assert_eq!(config.enum_element_min, 3);
        assert!(config.is_rule_enabled("void-function"));
        assert_eq!(config.referenced_rules().count(), 0);
    }

    #[test]
    fn builder_defaults_match_default() {
        let built = DetectorConfig::builder().build().expect("defaults are valid");
        assert_eq!(built, DetectorConfig::default());
    }

    #[test]
    fn rejects_negative_and_zero_thresholds() {
        let err = DetectorConfig::builder().indent_limit(-1).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidThreshold {
                name: "indent_limit",
                value: -1
            }
        );
        assert!(DetectorConfig::builder()
            .enum_element_min(0)
            .build()
            .is_err());
    }

    #[test]
    fn disable_and_enable_only() {
        let config = DetectorConfig::builder()
            .enable_only(["void-function", "comment-style"])
            .disable("comment-style")
            .build()
            .expect("valid");

        assert!(config.is_rule_enabled("void-function"));
        assert!(!config.is_rule_enabled("comment-style"));
        assert!(!config.is_rule_enabled("small-enum"));

        let mut referenced: Vec<&str> = config.referenced_rules().collect();
        referenced.sort_unstable();
        assert_eq!(
            referenced,
            vec!["comment-style", "comment-style", "void-function"]
        );
    }
}
