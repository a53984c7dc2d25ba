//! Rule flagging local variables declared without an initializer.
//!
//! # Rationale
//!
//! An uninitialized local holds whatever was left on the stack. Reading it
//! before assignment is undefined behavior and hard to reproduce.
//!
//! # Detected Patterns
//!
//! For every top-level function the candidates are:
//!
//! - `VarDecl` nodes that are direct children of the function
//! - `VarDecl` nodes directly inside the function body, or one level down
//!   inside a declaration statement of the body
//!
//! A candidate counts as initialized when one of its children is a cast,
//! call, integer/floating/string literal, implicit conversion, parenthesized
//! expression or binary operator. An array's bound is one of its children,
//! so `char buf[64];` counts as initialized.
//!
//! # Limitations
//!
//! The scan is shallow: variables declared inside nested blocks (`if`,
//! `for`, `while` bodies) are neither reported nor cleared. Initializers
//! built only from other forms, such as `-1`, `&x`, `sizeof x` or an
//! unsized array's `{ 0 }`, are not recognised, so those variables are
//! reported.

use ground_rule_core::{
    FileContext, Finding, Location, NodeKind, Rule, Suggestion, SyntaxNode, SyntaxTree,
};

/// Rule code for uninit-local.
pub const CODE: &str = "GR007";

/// Rule name for uninit-local.
pub const NAME: &str = "uninit-local";

/// Flags local variables declared without an initializer.
#[derive(Debug, Clone, Default)]
pub struct UninitLocal;

impl UninitLocal {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Local variables of `function` within the shallow scan scope.
fn local_variables(function: &SyntaxNode) -> Vec<&SyntaxNode> {
    let mut locals = Vec::new();

    for child in &function.children {
        match child.kind {
            NodeKind::VarDecl => locals.push(child),
            NodeKind::CompoundStmt => {
                for stmt in &child.children {
                    match stmt.kind {
                        NodeKind::VarDecl => locals.push(stmt),
                        NodeKind::DeclStmt => {
                            locals.extend(stmt.children_of_kind(NodeKind::VarDecl));
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    locals
}

fn is_initialized(variable: &SyntaxNode) -> bool {
    variable.children.iter().any(|c| c.kind.is_initializer())
}

impl Rule for UninitLocal {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Local variables must be initialized where they are declared"
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
        let mut findings = Vec::new();

        for function in tree.top_level(NodeKind::FunctionDecl, ctx.path) {
            for var in local_variables(function) {
                if is_initialized(var) {
                    continue;
                }
                findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        self.default_severity(),
                        Location::line(ctx.path, var.line),
                        format!(
                            "local variable `{}` in `{}` is not initialized",
                            var.spelling, function.spelling
                        ),
                    )
                    .with_symbol(&var.spelling)
                    .with_suggestion(Suggestion::new(format!(
                        "Initialize `{}` at its declaration",
                        var.spelling
                    ))),
                );
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_c, check_tree, symbols, TEST_FILE};
    use ground_rule_core::DeclaredType;
    use ground_rule_core::TypeKind;
    use std::path::Path;
    use std::sync::Arc;

    #[test]
    fn flags_missing_initializers() {
        let findings = check_c(
            &UninitLocal::new(),
            "int run(int arg)\n\
             {\n\
             \tint x;\n\
             \tint y = 0;\n\
             \tint a, b = arg;\n\
             \treturn x + y + a + b;\n\
             }\n",
        );
        assert_eq!(symbols(&findings), vec!["x", "a"]);
        assert_eq!(findings[0].location.line, 3);
        assert_eq!(findings[1].location.line, 5);
        assert!(findings[0].message.contains("in `run`"));
    }

    #[test]
    fn recognised_initializers() {
        let findings = check_c(
            &UninitLocal::new(),
            "int init(int *p, int n)\n\
             {\n\
             \tdouble d = 1.5;\n\
             \tconst char *s = \"name\";\n\
             \tlong l = (long)n;\n\
             \tint c = compute(n);\n\
             \tint sum = n + 1;\n\
             \tint copy = n;\n\
             \tint deref = *p;\n\
             \tint paren = (n);\n\
             \tchar ch = 'a';\n\
             \tint *none = NULL;\n\
             \treturn 0;\n\
             }\n",
        );
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn unrecognised_initializers_are_reported() {
        let findings = check_c(
            &UninitLocal::new(),
            "int odd(int n)\n\
             {\n\
             \tint neg = -1;\n\
             \tint *addr = &n;\n\
             \tint arr[] = { 0 };\n\
             \treturn 0;\n\
             }\n",
        );
        assert_eq!(symbols(&findings), vec!["neg", "addr", "arr"]);
    }

    #[test]
    fn sized_arrays_count_as_initialized() {
        let findings = check_c(
            &UninitLocal::new(),
            "int fill(int n)\n\
             {\n\
             \tchar buf[64];\n\
             \tint vla[n];\n\
             \tint table[4] = { 0 };\n\
             \tchar name[] = { 'a', 0 };\n\
             \treturn 0;\n\
             }\n",
        );
        assert_eq!(symbols(&findings), vec!["name"]);
    }

    #[test]
    fn nested_blocks_are_out_of_scope() {
        let findings = check_c(
            &UninitLocal::new(),
            "int nested(int n)\n\
             {\n\
             \tif (n) {\n\
             \t\tint inner;\n\
             \t\tint set = 1;\n\
             \t\tinner = set;\n\
             \t}\n\
             \tfor (int i; n; n--) {\n\
             \t\tint loop;\n\
             \t}\n\
             \treturn n;\n\
             }\n",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn prototypes_have_no_locals() {
        assert!(check_c(&UninitLocal::new(), "int proto(int n);\n").is_empty());
    }

    #[test]
    fn direct_variable_children_are_candidates() {
        let file: Arc<Path> = Arc::from(Path::new(TEST_FILE));
        let int = || DeclaredType::new("int", TypeKind::Builtin);

        let function = SyntaxNode::new(NodeKind::FunctionDecl, "legacy", file.clone(), 1)
            .with_child(SyntaxNode::new(NodeKind::VarDecl, "bare", file.clone(), 2).with_type(int()))
            .with_child(
                SyntaxNode::new(NodeKind::VarDecl, "set", file.clone(), 3)
                    .with_type(int())
                    .with_child(SyntaxNode::new(NodeKind::IntegerLiteral, "", file.clone(), 3)),
            )
            .with_child(
                SyntaxNode::new(NodeKind::CompoundStmt, "", file.clone(), 4).with_child(
                    SyntaxNode::new(NodeKind::VarDecl, "body", file.clone(), 5).with_type(int()),
                ),
            );
        let root = SyntaxNode::new(NodeKind::TranslationUnit, "", file, 1).with_child(function);

        let findings = check_tree(&UninitLocal::new(), root);
        assert_eq!(symbols(&findings), vec!["bare", "body"]);
    }
}
