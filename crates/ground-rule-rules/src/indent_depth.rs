//! Rule limiting indentation depth inside functions.
//!
//! # Rationale
//!
//! Deeply nested `if`/`for` blocks are hard to follow. Past a few levels the
//! body should be split into helper functions or use early returns.
//!
//! # Detected Patterns
//!
//! For every top-level function, every physical line of its extent is
//! scanned and the leading tab characters are counted. If the deepest line
//! reaches the configured `indent_limit` the function is flagged once, at
//! the first line with that depth.
//!
//! # Limitations
//!
//! This is a textual heuristic over tab indentation, not a structural
//! nesting count. Lines indented with spaces only count as depth zero, so
//! space-indented code is invisible to this rule.

use ground_rule_core::{FileContext, Finding, Location, NodeKind, Rule, Suggestion, SyntaxTree};

/// Rule code for indent-depth.
pub const CODE: &str = "GR003";

/// Rule name for indent-depth.
pub const NAME: &str = "indent-depth";

/// Flags functions whose body is indented too deeply.
#[derive(Debug, Clone, Default)]
pub struct IndentDepth;

impl IndentDepth {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Deepest tab indentation in `start..=end` and the first line reaching it.
///
/// Lines past the end of the file are ignored. Returns `(line, depth)`.
fn deepest_line(ctx: &FileContext, start: usize, end: usize) -> (usize, usize) {
    let mut max_depth = 0;
    let mut max_line = start;

    for number in start..=end {
        let Some(text) = ctx.line(number) else {
            break;
        };
        let depth = text.chars().take_while(|c| *c == '\t').count();
        if depth > max_depth {
            max_depth = depth;
            max_line = number;
        }
    }

    (max_line, max_depth)
}

impl Rule for IndentDepth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits tab indentation depth inside functions"
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
        let limit = ctx.config.indent_limit;

        tree.top_level(NodeKind::FunctionDecl, ctx.path)
            .filter_map(|f| {
                let (line, depth) = deepest_line(ctx, f.extent.start_line, f.extent.end_line);
                (depth >= limit).then(|| {
                    Finding::new(
                        CODE,
                        NAME,
                        self.default_severity(),
                        Location::line(ctx.path, line),
                        format!(
                            "function `{}` is indented {depth} levels deep (limit {limit})",
                            f.spelling
                        ),
                    )
                    .with_symbol(&f.spelling)
                    .with_suggestion(Suggestion::new(
                        "Extract nested blocks into helper functions or return early",
                    ))
                })
            })
            .collect()
    }
}
