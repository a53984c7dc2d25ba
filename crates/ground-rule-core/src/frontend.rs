//! Parser frontend abstraction.
//!
//! `Frontend` is the seam between the analyzer and a concrete parser. A
//! frontend turns raw source text into the [`SyntaxTree`] model; rules never
//! see the parser's own types.

use std::path::Path;

use crate::syntax::SyntaxTree;

/// The source could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Failure located at a line of the source.
    #[error("line {line}: {message}")]
    AtLine {
        /// First offending line (1-indexed).
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Failure without position information.
    #[error("{0}")]
    Other(String),
}

impl ParseError {
    /// Creates an error without position information.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Creates an error located at a line.
    #[must_use]
    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        Self::AtLine {
            line,
            message: message.into(),
        }
    }

    /// First offending line, when known.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::AtLine { line, .. } => Some(*line),
            Self::Other(_) => None,
        }
    }
}

/// Trait for language-specific parsing.
///
/// Implement this to plug a parser into the [`Analyzer`](crate::Analyzer).
pub trait Frontend: Send + Sync {
    /// Language identifier (e.g., `"c"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this frontend handles (e.g., `&[".c", ".h"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses one file's source text.
    ///
    /// Every node of the returned tree that originates in `source` must carry
    /// `path` as its source file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the source is not a valid translation unit.
    fn parse(&self, path: &Path, source: &str) -> Result<SyntaxTree, ParseError>;
}

/// Type alias for boxed Frontend trait objects.
pub type FrontendBox = Box<dyn Frontend>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        assert_eq!(
            ParseError::at_line("unexpected token", 7).to_string(),
            "line 7: unexpected token"
        );
        assert_eq!(
            ParseError::new("grammar unavailable").to_string(),
            "grammar unavailable"
        );
        assert_eq!(ParseError::at_line("x", 3).line(), Some(3));
        assert_eq!(ParseError::new("x").line(), None);
    }
}
