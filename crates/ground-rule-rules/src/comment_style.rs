//! Rule restricting comments to the `/* ... */` block form.
//!
//! # Rationale
//!
//! One comment style per code base. Block comments are valid in every C
//! standard the project targets, so `//` comments are not allowed.
//!
//! # Detected Patterns
//!
//! Every comment token in the file is checked against
//! `^/\*+[\s\S]*?\s*\*/$` after trimming surrounding whitespace. Anything
//! that does not match is flagged by line, which includes:
//!
//! - every `//` line comment
//! - a `/*` comment that is never closed
//!
//! The pattern is deliberately loose in the middle, so text such as
//! `/* a /* b */` is accepted.

use ground_rule_core::{FileContext, Finding, Location, Rule, Suggestion, SyntaxTree};
use regex::Regex;

/// Rule code for comment-style.
pub const CODE: &str = "GR006";

/// Rule name for comment-style.
pub const NAME: &str = "comment-style";

const BLOCK_COMMENT: &str = r"^/\*+[\s\S]*?\s*\*/$";

/// Flags comments that are not `/* ... */` blocks.
#[derive(Debug, Clone)]
pub struct CommentStyle {
    pattern: Regex,
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentStyle {
    /// Creates a new rule.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(BLOCK_COMMENT).expect("valid regex"),
        }
    }

    /// Returns true if `text` is an accepted comment.
    #[must_use]
    pub fn is_valid_comment(&self, text: &str) -> bool {
        self.pattern.is_match(text.trim())
    }
}

impl Rule for CommentStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Comments must use the /* ... */ block form"
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
        tree.comments()
            .filter(|c| !self.is_valid_comment(&c.text))
            .map(|c| {
                Finding::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    Location::line(ctx.path, c.line),
                    "comment is not a /* ... */ block comment",
                )
                .with_suggestion(Suggestion::new("Rewrite as /* ... */"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check_c;

    #[test]
    fn accepted_forms() {
        let rule = CommentStyle::new();
        assert!(rule.is_valid_comment("/* ok */"));
        assert!(rule.is_valid_comment("/** doc */"));
        assert!(rule.is_valid_comment("/*\n * multi\n * line\n */"));
        assert!(rule.is_valid_comment("  /*padded*/\n"));
        assert!(rule.is_valid_comment("/* a /* b */"));
    }

    #[test]
    fn rejected_forms() {
        let rule = CommentStyle::new();
        assert!(!rule.is_valid_comment("// line"));
        assert!(!rule.is_valid_comment("/// doc"));
        assert!(!rule.is_valid_comment("/* unterminated"));
        assert!(!rule.is_valid_comment("/ * spaced */"));
    }

    #[test]
    fn flags_line_comments_by_line() {
        let findings = check_c(
            &CommentStyle::new(),
            "/* header */\n\
             int x; // trailing\n\
             // leading\n\
             int f(void)\n\
             {\n\
             \t/* fine */\n\
             \treturn 0; // done\n\
             }\n",
        );
        let lines: Vec<usize> = findings.iter().map(|f| f.location.line).collect();
        assert_eq!(lines, vec![2, 3, 7]);
        assert!(findings.iter().all(|f| f.symbol.is_none()));
    }
}
