//! Rule requiring an `_e` suffix on enum typedefs.
//!
//! # Rationale
//!
//! The suffix tells readers at every use site that the type is an
//! enumeration, without looking up the typedef.
//!
//! # Detected Patterns
//!
//! - Top-level typedefs whose canonical type is an enum (directly or through
//!   other typedefs) and whose name does not end in `_e`
//!
//! Typedefs of pointers to enums, structs and builtins are never flagged.

use ground_rule_core::{
    FileContext, Finding, Location, NodeKind, Rule, Suggestion, SyntaxTree, TypeKind,
};

/// Rule code for enum-typedef-suffix.
pub const CODE: &str = "GR005";

/// Rule name for enum-typedef-suffix.
pub const NAME: &str = "enum-typedef-suffix";

const SUFFIX: &str = "_e";

/// Flags enum typedefs not named `*_e`.
#[derive(Debug, Clone, Default)]
pub struct EnumTypedefSuffix;

impl EnumTypedefSuffix {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EnumTypedefSuffix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Typedefs of enums must end with `_e`"
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
        tree.top_level(NodeKind::TypedefDecl, ctx.path)
            .filter(|t| t.canonical_type() == Some(TypeKind::Enum))
            .filter(|t| !t.spelling.ends_with(SUFFIX))
            .map(|t| {
                let base = t.spelling.strip_suffix("_t").unwrap_or(&t.spelling);
                Finding::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    Location::line(ctx.path, t.line),
                    format!("enum typedef `{}` does not end with `{SUFFIX}`", t.spelling),
                )
                .with_symbol(&t.spelling)
                .with_suggestion(Suggestion::new(format!("Rename to `{base}{SUFFIX}`")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_c, symbols};

    #[test]
    fn enum_typedefs_need_suffix() {
        let findings = check_c(
            &EnumTypedefSuffix::new(),
            "typedef enum { OK, FAIL, RETRY } status_e;\n\
             typedef enum { IDLE, BUSY, DONE } status_t;\n\
             typedef struct { int x; } point_t;\n\
             typedef struct { int y; } shape_e;\n\
             typedef int count_t;\n",
        );
        assert_eq!(symbols(&findings), vec!["status_t"]);
        assert_eq!(findings[0].location.line, 2);
        assert_eq!(
            findings[0].suggestion.as_ref().map(|s| s.message.as_str()),
            Some("Rename to `status_e`")
        );
    }

    #[test]
    fn resolves_through_aliases() {
        let findings = check_c(
            &EnumTypedefSuffix::new(),
            "enum color { RED, GREEN, BLUE };\n\
             typedef enum color color_e;\n\
             typedef color_e shade;\n\
             typedef color_e *color_ref;\n",
        );
        assert_eq!(symbols(&findings), vec!["shade"]);
    }

    #[test]
    fn unknown_types_are_not_flagged() {
        let findings = check_c(&EnumTypedefSuffix::new(), "typedef size_t length;\n");
        assert!(findings.is_empty());
    }
}
