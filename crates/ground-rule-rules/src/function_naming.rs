//! Rule enforcing snake_case function names.
//!
//! # Rationale
//!
//! C code conventionally names functions in snake_case. Mixed styles make
//! an API harder to read and to grep.
//!
//! # Detected Patterns
//!
//! - Top-level functions whose name does not match
//!   `^_*[a-z0-9]+(_[a-z0-9]+)*$`: optional leading underscores, then
//!   lowercase alphanumeric segments joined by single underscores
//!
//! `DoThing`, `doThing`, `do__thing` and `do_thing_` are flagged;
//! `do_thing`, `_private_fn` and `fn2` pass. There is no exemption list.

use ground_rule_core::{FileContext, Finding, Location, NodeKind, Rule, Suggestion, SyntaxTree};
use regex::Regex;

/// Rule code for function-naming.
pub const CODE: &str = "GR002";

/// Rule name for function-naming.
pub const NAME: &str = "function-naming";

const SNAKE_CASE: &str = r"^_*[a-z0-9]+(_[a-z0-9]+)*$";

/// Flags function names that are not snake_case.
#[derive(Debug, Clone)]
pub struct FunctionNaming {
    pattern: Regex,
}

impl Default for FunctionNaming {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionNaming {
    /// Creates a new rule.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(SNAKE_CASE).expect("valid regex"),
        }
    }

    /// Returns true if `name` is snake_case.
    #[must_use]
    pub fn is_snake_case(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

impl Rule for FunctionNaming {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Function names must be snake_case"
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
        tree.top_level(NodeKind::FunctionDecl, ctx.path)
            .filter(|f| !self.is_snake_case(&f.spelling))
            .map(|f| {
                Finding::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    Location::line(ctx.path, f.line),
                    format!("function `{}` is not snake_case", f.spelling),
                )
                .with_symbol(&f.spelling)
                .with_suggestion(Suggestion::new(format!(
                    "Rename to `{}`",
                    to_snake_case(&f.spelling)
                )))
            })
            .collect()
    }
}

/// Best-effort snake_case spelling of `name`, used in suggestions.
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_lower = true;
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        }
    }

    let leading = name.chars().take_while(|c| *c == '_').count();
    let body = out.trim_matches('_');
    format!("{}{body}", "_".repeat(leading))
}
