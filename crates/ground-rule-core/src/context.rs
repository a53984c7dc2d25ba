//! Context types for rule execution.

use std::path::Path;

use crate::config::DetectorConfig;

/// Context provided to per-file rules.
///
/// Bundles what a rule may consult besides the syntax tree: the path under
/// analysis, its raw text lines and the run's read-only configuration.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// Path of the file under analysis, as given to the analyzer.
    pub path: &'a Path,
    /// Raw text lines of the file, without line terminators.
    pub lines: &'a [String],
    /// Run configuration.
    pub config: &'a DetectorConfig,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, lines: &'a [String], config: &'a DetectorConfig) -> Self {
        Self {
            path,
            lines,
            config,
        }
    }

    /// Returns a 1-indexed line, or `None` if out of range.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&'a str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }
}

/// Splits file content into lines, dropping `\n` and `\r\n` terminators.
#[must_use]
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_owned).collect()
}
