//! Rule flagging functions that return `void`.
//!
//! # Rationale
//!
//! A `void` function gives its caller no channel to learn about failure.
//! Returning a status code keeps error handling visible at every call site.
//!
//! # Detected Patterns
//!
//! - Top-level function definitions and prototypes whose return type is
//!   spelled exactly `void` (`void *` is a pointer and passes)
//!
//! Callbacks are exempt: names ending in `_cb`, `_callback` or `_handler`
//! usually have their signature dictated by the API they are registered with.
//! Constructors and destructors are never considered.

use ground_rule_core::{FileContext, Finding, Location, NodeKind, Rule, Suggestion, SyntaxTree};

/// Rule code for void-function.
pub const CODE: &str = "GR001";

/// Rule name for void-function.
pub const NAME: &str = "void-function";

/// Name suffixes that mark a callback.
const CALLBACK_SUFFIXES: &[&str] = &["_cb", "_callback", "_handler"];

/// Flags functions declared with a `void` return type.
#[derive(Debug, Clone, Default)]
pub struct VoidFunction;

impl VoidFunction {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_callback(name: &str) -> bool {
    CALLBACK_SUFFIXES.iter().any(|s| name.ends_with(s))
}

impl Rule for VoidFunction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Functions should return a status instead of void"
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
        tree.top_level(NodeKind::FunctionDecl, ctx.path)
            .filter(|f| !is_callback(&f.spelling) && f.type_spelling() == "void")
            .map(|f| {
                Finding::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    Location::line(ctx.path, f.line),
                    format!("function `{}` returns void", f.spelling),
                )
                .with_symbol(&f.spelling)
                .with_suggestion(Suggestion::new(
                    "Return an error code so callers can detect failure",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_c, check_tree, symbols, TEST_FILE};
    use ground_rule_core::{DeclaredType, SyntaxNode, TypeKind};
    use std::path::Path;
    use std::sync::Arc;

    #[test]
    fn flags_void_functions() {
        let findings = check_c(
            &VoidFunction::new(),
            "void reset(void);\n\
             int status(void);\n\
             void *alloc(int n);\n\
             static void\n\
             flush(int fd)\n\
             {\n\
             \treturn;\n\
             }\n",
        );

        assert_eq!(symbols(&findings), vec!["reset", "flush"]);
        assert_eq!(findings[0].location.line, 1);
        assert_eq!(findings[1].location.line, 5);
        assert!(findings[0].suggestion.is_some());
    }

    #[test]
    fn callbacks_are_exempt() {
        let findings = check_c(
            &VoidFunction::new(),
            "void on_timer_cb(int id);\n\
             void button_callback(void);\n\
             void irq_handler(void);\n\
             void handler_setup(void);\n",
        );
        assert_eq!(symbols(&findings), vec!["handler_setup"]);
    }

    #[test]
    fn prototype_and_definition_are_separate_declarations() {
        let findings = check_c(
            &VoidFunction::new(),
            "void tick(void);\n\nvoid tick(void)\n{\n}\n",
        );
        let lines: Vec<usize> = findings.iter().map(|f| f.location.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn nested_declarations_are_not_inspected() {
        let findings = check_c(
            &VoidFunction::new(),
            "int outer(void)\n{\n\tvoid inner(void);\n\treturn 0;\n}\n",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn skips_constructors_and_foreign_nodes() {
        let here: Arc<Path> = Arc::from(Path::new(TEST_FILE));
        let header: Arc<Path> = Arc::from(Path::new("/src/include/api.h"));
        let void = || DeclaredType::new("void", TypeKind::Void);

        let root = SyntaxNode::new(NodeKind::TranslationUnit, "", here.clone(), 1)
            .with_child(SyntaxNode::new(NodeKind::FunctionDecl, "api_init", header, 4).with_type(void()))
            .with_child(SyntaxNode::new(NodeKind::Constructor, "Widget", here.clone(), 7).with_type(void()))
            .with_child(SyntaxNode::new(NodeKind::Destructor, "~Widget", here.clone(), 8).with_type(void()))
            .with_child(SyntaxNode::new(NodeKind::FunctionDecl, "run", here, 10).with_type(void()));

        let findings = check_tree(&VoidFunction::new(), root);
        assert_eq!(symbols(&findings), vec!["run"]);
    }
}
