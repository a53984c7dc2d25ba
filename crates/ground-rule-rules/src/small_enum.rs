//! Rule flagging enums with too few constants.
//!
//! # Rationale
//!
//! An enum with one or two values is a boolean in disguise. A `bool` or a
//! pair of `#define`s says the same thing with less ceremony.
//!
//! # Detected Patterns
//!
//! - Top-level enum definitions whose number of constants is below the
//!   configured `enum_element_min` (default 3), reported at the line where
//!   the definition starts

use ground_rule_core::{FileContext, Finding, Location, NodeKind, Rule, Suggestion, SyntaxTree};

/// Rule code for small-enum.
pub const CODE: &str = "GR004";

/// Rule name for small-enum.
pub const NAME: &str = "small-enum";

/// Display name for enums without a tag.
const ANONYMOUS: &str = "(anonymous)";

/// Flags enums with fewer constants than the configured minimum.
#[derive(Debug, Clone, Default)]
pub struct SmallEnum;

impl SmallEnum {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SmallEnum {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enums need enough constants to justify not being a boolean"
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
        let min = ctx.config.enum_element_min;

        tree.top_level(NodeKind::EnumDecl, ctx.path)
            .filter_map(|e| {
                let count = e.children_of_kind(NodeKind::EnumConstantDecl).count();
                if count >= min {
                    return None;
                }
                let name = if e.spelling.is_empty() {
                    ANONYMOUS
                } else {
                    e.spelling.as_str()
                };
                Some(
                    Finding::new(
                        CODE,
                        NAME,
                        self.default_severity(),
                        Location::line(ctx.path, e.extent.start_line),
                        format!("enum `{name}` has {count} constants (minimum {min})"),
                    )
                    .with_symbol(name)
                    .with_suggestion(Suggestion::new("Use a bool instead")),
                )
            })
            .collect()
    }
}
