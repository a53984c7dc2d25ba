//! Core types for ground-rule findings.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail a run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File the finding belongs to.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Creates a location for a whole line.
    #[must_use]
    pub fn line(file: impl Into<PathBuf>, line: usize) -> Self {
        Self::new(file, line, 1)
    }
}

/// A suggested fix for a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A ground-rule violation found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule code (e.g., "GR001").
    pub code: String,
    /// Rule name (e.g., "void-function").
    pub rule: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Primary location of the finding.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Name of the function, enum, typedef or variable concerned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            symbol: None,
            suggestion: None,
        }
    }

    /// Records the symbol this finding is about.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Adds a suggestion to this finding.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Builds a miette diagnostic pointing into `source`.
    ///
    /// The label covers the whole line the finding points at.
    #[must_use]
    pub fn to_diagnostic(&self, source: &str) -> FindingDiagnostic {
        let (offset, length) = line_span(source, self.location.line);
        FindingDiagnostic {
            message: format!("[{}] {}", self.code, self.message),
            help: self.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((offset, length)),
            label_message: self.rule.clone(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Byte offset and length of a 1-indexed line, or `(0, 0)` if out of range.
fn line_span(source: &str, line: usize) -> (usize, usize) {
    if line == 0 {
        return (0, 0);
    }

    let mut offset = 0;
    for (i, content) in source.split('\n').enumerate() {
        if i + 1 == line {
            return (offset, content.trim_end_matches('\r').len());
        }
        offset += content.len() + 1;
    }
    (0, 0)
}

/// A [`Finding`] rendered as a miette diagnostic for rich terminal output.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding() -> Finding {
        Finding::new(
            "GR001",
            "void-function",
            Severity::Info,
            Location::new("src/main.c", 2, 6),
            "function `reset` returns void",
        )
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(
            make_finding().to_string(),
            "src/main.c:2:6: info [GR001] function `reset` returns void"
        );
    }

    #[test]
    fn symbol_and_suggestion_are_optional() {
        let f = make_finding();
        assert!(f.symbol.is_none());
        assert!(f.suggestion.is_none());

        let f = f
            .with_symbol("reset")
            .with_suggestion(Suggestion::new("return an error code"));
        assert_eq!(f.symbol.as_deref(), Some("reset"));
        assert_eq!(
            f.suggestion.map(|s| s.message),
            Some("return an error code".to_string())
        );
    }

    #[test]
    fn line_span_covers_requested_line() {
        let source = "int a;\r\nvoid reset(void);\nint b;";
        assert_eq!(line_span(source, 1), (0, 6));
        assert_eq!(line_span(source, 2), (8, 17));
        assert_eq!(line_span(source, 3), (26, 6));
        assert_eq!(line_span(source, 9), (0, 0));
        assert_eq!(line_span(source, 0), (0, 0));
    }

    #[test]
    fn diagnostic_carries_code_and_help() {
        let f = make_finding().with_suggestion(Suggestion::new("return int"));
        let diag = f.to_diagnostic("int a;\nvoid reset(void);\n");
        assert_eq!(diag.to_string(), "[GR001] function `reset` returns void");
        assert_eq!(diag.help.as_deref(), Some("return int"));
        assert_eq!(diag.span, SourceSpan::from((7, 17)));
    }
}
