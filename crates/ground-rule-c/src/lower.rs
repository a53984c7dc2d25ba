//! Lowering of tree-sitter C syntax into the language-neutral syntax model.

use std::path::Path;
use std::sync::Arc;
use tree_sitter::{Node, Tree};

use ground_rule_core::{CommentToken, DeclaredType, NodeKind, SyntaxNode, SyntaxTree, TypeKind};

use crate::types::{
    full_spelling, function_shape, node_text, qualifiers, specifier_kind, specifier_spelling,
    unwrap_declarator, FunctionShape, TypedefTable,
};

/// Builds the syntax model for one parsed file.
pub(crate) struct Lowerer<'src> {
    src: &'src [u8],
    file: Arc<Path>,
    typedefs: TypedefTable,
}

impl<'src> Lowerer<'src> {
    pub(crate) fn new(path: &Path, src: &'src [u8]) -> Self {
        Self {
            src,
            file: Arc::from(path),
            typedefs: TypedefTable::default(),
        }
    }

    pub(crate) fn lower(mut self, tree: &Tree, comments: Vec<CommentToken>) -> SyntaxTree {
        let root = tree.root_node();
        let mut unit = self
            .node(NodeKind::TranslationUnit, "", 1)
            .with_extent(1, end_line(root));
        self.lower_items(root, &mut unit.children);

        SyntaxTree::new(unit, comments)
    }

    fn node(&self, kind: NodeKind, spelling: &str, line: usize) -> SyntaxNode {
        SyntaxNode::new(kind, spelling, self.file.clone(), line)
    }

    fn text(&self, node: Node<'_>) -> &'src str {
        node_text(node, self.src)
    }

    /// File-scope items. Preprocessor conditionals and `extern "C"` blocks
    /// are transparent: their contents count as top level. So are recovered
    /// syntax errors, which keep only the complete items inside them.
    fn lower_items(&mut self, parent: Node<'_>, out: &mut Vec<SyntaxNode>) {
        let mut cursor = parent.walk();
        for child in parent.named_children(&mut cursor) {
            match child.kind() {
                "function_definition" => out.extend(self.lower_function_definition(child)),
                "declaration" => self.lower_declaration(child, out),
                "type_definition" => self.lower_type_definition(child, out),
                "enum_specifier" | "struct_specifier" | "union_specifier" => {
                    out.extend(self.lower_tag_definition(child));
                }
                "preproc_if" | "preproc_ifdef" | "preproc_else" | "preproc_elif"
                | "preproc_elifdef" | "linkage_specification" | "declaration_list"
                | "ERROR" => {
                    self.lower_items(child, out);
                }
                _ => {}
            }
        }
    }

    fn lower_function_definition(&mut self, node: Node<'_>) -> Option<SyntaxNode> {
        let declarator = node.child_by_field_name("declarator")?;
        let shape = function_shape(declarator)?;

        let mut function = self
            .function_decl(node, &shape)
            .with_extent(start_line(node), end_line(node));

        if let Some(body) = node.child_by_field_name("body") {
            function.children.extend(self.lower_statement(body));
        }
        Some(function)
    }

    /// A `FunctionDecl` with return type and parameters but no body.
    fn function_decl(&self, decl: Node<'_>, shape: &FunctionShape<'_>) -> SyntaxNode {
        let return_type = decl.child_by_field_name("type").map_or_else(
            || DeclaredType::new("int", TypeKind::Builtin),
            |ty| {
                let base_kind = specifier_kind(ty, self.src, &self.typedefs);
                let spelling = full_spelling(
                    &qualifiers(decl, self.src),
                    &specifier_spelling(ty, self.src),
                    shape.return_pointer_depth,
                );
                let canonical = if shape.return_pointer_depth > 0 {
                    TypeKind::Pointer
                } else {
                    base_kind
                };
                DeclaredType::new(spelling, canonical)
            },
        );

        let mut function = self
            .node(
                NodeKind::FunctionDecl,
                self.text(shape.name),
                start_line(shape.name),
            )
            .with_type(return_type);

        if let Some(params) = shape.parameters {
            let mut cursor = params.walk();
            for param in params.named_children(&mut cursor) {
                if param.kind() != "parameter_declaration" {
                    continue;
                }
                let declarator = param.child_by_field_name("declarator");
                let is_void = param
                    .child_by_field_name("type")
                    .is_some_and(|ty| self.text(ty) == "void");
                if declarator.is_none() && is_void {
                    continue;
                }
                let name = declarator.and_then(|d| unwrap_declarator(d).name);
                let (spelling, line) =
                    name.map_or(("", start_line(param)), |n| (self.text(n), start_line(n)));
                function.children.push(self.node(NodeKind::ParmDecl, spelling, line));
            }
        }

        function
    }

    /// Lowers a declaration's entities into `out`: tag definitions first,
    /// then one `FunctionDecl` or `VarDecl` per declarator.
    fn lower_declaration(&mut self, node: Node<'_>, out: &mut Vec<SyntaxNode>) {
        let Some(ty) = node.child_by_field_name("type") else {
            return;
        };
        out.extend(self.lower_tag_definition(ty));

        let base_kind = specifier_kind(ty, self.src, &self.typedefs);
        let base_spelling = specifier_spelling(ty, self.src);
        let quals = qualifiers(node, self.src);

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let (target, value) = if declarator.kind() == "init_declarator" {
                (
                    declarator.child_by_field_name("declarator"),
                    declarator.child_by_field_name("value"),
                )
            } else {
                (Some(declarator), None)
            };
            let Some(target) = target else { continue };

            if let Some(shape) = function_shape(target) {
                out.push(
                    self.function_decl(node, &shape)
                        .with_extent(start_line(node), end_line(node)),
                );
                continue;
            }

            let unwrapped = unwrap_declarator(target);
            let Some(name) = unwrapped.name else { continue };
            let declared = DeclaredType::new(
                full_spelling(&quals, &base_spelling, unwrapped.pointer_depth()),
                unwrapped.canonical(base_kind),
            );

            let mut var = self
                .node(NodeKind::VarDecl, self.text(name), start_line(name))
                .with_type(declared)
                .with_extent(start_line(declarator), end_line(declarator));
            for size in &unwrapped.sizes {
                var.children.extend(self.lower_initializer(*size));
            }
            if let Some(value) = value {
                var.children.extend(self.lower_initializer(value));
            }
            out.push(var);
        }
    }

    /// Lowers a `typedef`, recording each new name's canonical kind so later
    /// typedefs and declarations resolve through it.
    fn lower_type_definition(&mut self, node: Node<'_>, out: &mut Vec<SyntaxNode>) {
        let Some(ty) = node.child_by_field_name("type") else {
            return;
        };
        out.extend(self.lower_tag_definition(ty));

        let base_kind = specifier_kind(ty, self.src, &self.typedefs);
        let base_spelling = specifier_spelling(ty, self.src);
        let quals = qualifiers(node, self.src);

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let unwrapped = unwrap_declarator(declarator);
            let Some(name) = unwrapped.name else { continue };
            let canonical = unwrapped.canonical(base_kind);
            let spelling = self.text(name);

            self.typedefs.insert(spelling, canonical);
            out.push(
                self.node(NodeKind::TypedefDecl, spelling, start_line(name))
                    .with_type(DeclaredType::new(
                        full_spelling(&quals, &base_spelling, unwrapped.pointer_depth()),
                        canonical,
                    ))
                    .with_extent(start_line(node), end_line(node)),
            );
        }
    }

    /// `enum`/`struct`/`union` specifiers that carry a body become declarations.
    fn lower_tag_definition(&self, node: Node<'_>) -> Option<SyntaxNode> {
        let kind = match node.kind() {
            "enum_specifier" => NodeKind::EnumDecl,
            "struct_specifier" | "union_specifier" => NodeKind::RecordDecl,
            _ => return None,
        };
        let body = node.child_by_field_name("body")?;

        let name = node.child_by_field_name("name");
        let spelling = name.map_or("", |n| self.text(n));
        let line = name.map_or_else(|| start_line(node), start_line);
        let mut decl = self
            .node(kind, spelling, line)
            .with_extent(start_line(node), end_line(node));

        if kind == NodeKind::EnumDecl {
            let mut cursor = body.walk();
            for enumerator in body.named_children(&mut cursor) {
                if enumerator.kind() != "enumerator" {
                    continue;
                }
                let Some(name) = enumerator.child_by_field_name("name") else {
                    continue;
                };
                let mut constant =
                    self.node(NodeKind::EnumConstantDecl, self.text(name), start_line(name));
                if let Some(value) = enumerator.child_by_field_name("value") {
                    constant.children.extend(self.lower_expression(value));
                }
                decl.children.push(constant);
            }
        }

        Some(decl)
    }

    /// Statements keep their nesting: blocks become `CompoundStmt`,
    /// declarations `DeclStmt`, everything else `Other` with lowered children.
    fn lower_statement(&mut self, node: Node<'_>) -> Option<SyntaxNode> {
        let (kind, line) = (node.kind(), start_line(node));
        let mut stmt = match kind {
            "comment" => return None,
            "compound_statement" => self.node(NodeKind::CompoundStmt, "", line),
            "declaration" | "type_definition" => {
                let mut decl_stmt = self.node(NodeKind::DeclStmt, "", line);
                if kind == "declaration" {
                    self.lower_declaration(node, &mut decl_stmt.children);
                } else {
                    self.lower_type_definition(node, &mut decl_stmt.children);
                }
                return Some(decl_stmt.with_extent(line, end_line(node)));
            }
            _ if is_expression(kind) => return self.lower_expression(node),
            _ => self.node(NodeKind::Other, "", line),
        };

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            stmt.children.extend(self.lower_statement(child));
        }
        Some(stmt.with_extent(line, end_line(node)))
    }

    /// A variable's initializer. Reads of lvalues (names, fields, elements,
    /// dereferences) and character literals are wrapped in an
    /// `ImplicitExpr`, standing for the conversion applied to the value.
    fn lower_initializer(&self, node: Node<'_>) -> Option<SyntaxNode> {
        let wraps = match node.kind() {
            "identifier" | "field_expression" | "subscript_expression" | "char_literal" => true,
            "pointer_expression" => node
                .child_by_field_name("operator")
                .is_some_and(|op| op.kind() == "*"),
            _ => false,
        };

        let inner = self.lower_expression(node)?;
        if !wraps {
            return Some(inner);
        }
        Some(
            self.node(NodeKind::ImplicitExpr, "", inner.line)
                .with_extent(inner.extent.start_line, inner.extent.end_line)
                .with_child(inner),
        )
    }

    fn lower_expression(&self, node: Node<'_>) -> Option<SyntaxNode> {
        let line = start_line(node);
        let (kind, spelling, leaf) = match node.kind() {
            "comment" => return None,
            "number_literal" => {
                let text = self.text(node);
                let kind = if is_floating_literal(text) {
                    NodeKind::FloatingLiteral
                } else {
                    NodeKind::IntegerLiteral
                };
                // The grammar folds a leading sign into the literal token.
                if text.starts_with(['-', '+']) {
                    let literal = self.node(kind, "", line).with_extent(line, line);
                    return Some(
                        self.node(NodeKind::UnaryOperator, "", line)
                            .with_extent(line, line)
                            .with_child(literal),
                    );
                }
                (kind, "", true)
            }
            "true" | "false" => (NodeKind::IntegerLiteral, "", true),
            "string_literal" | "concatenated_string" | "raw_string_literal" => {
                (NodeKind::StringLiteral, "", true)
            }
            "char_literal" => (NodeKind::CharacterLiteral, "", true),
            "null" => (NodeKind::ParenExpr, "", true),
            "identifier" => (NodeKind::DeclRefExpr, self.text(node), true),
            "call_expression" => {
                let callee = node
                    .child_by_field_name("function")
                    .filter(|f| f.kind() == "identifier")
                    .map_or("", |f| self.text(f));
                (NodeKind::CallExpr, callee, false)
            }
            "cast_expression" => (NodeKind::CStyleCastExpr, "", false),
            "binary_expression" => (NodeKind::BinaryOperator, "", false),
            "assignment_expression" => {
                let plain = node
                    .child_by_field_name("operator")
                    .is_some_and(|op| op.kind() == "=");
                let kind = if plain {
                    NodeKind::BinaryOperator
                } else {
                    NodeKind::Other
                };
                (kind, "", false)
            }
            "unary_expression" | "pointer_expression" | "update_expression" => {
                (NodeKind::UnaryOperator, "", false)
            }
            "parenthesized_expression" => (NodeKind::ParenExpr, "", false),
            "initializer_list" => (NodeKind::InitListExpr, "", false),
            _ => (NodeKind::Other, "", false),
        };

        let mut expr = self
            .node(kind, spelling, line)
            .with_extent(line, end_line(node));
        if !leaf {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                expr.children.extend(self.lower_expression(child));
            }
        }
        Some(expr)
    }
}

fn start_line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

fn end_line(node: Node<'_>) -> usize {
    node.end_position().row + 1
}

fn is_expression(kind: &str) -> bool {
    kind.ends_with("_expression")
        || kind.ends_with("_literal")
        || matches!(
            kind,
            "identifier" | "concatenated_string" | "initializer_list" | "null" | "true" | "false"
        )
}

/// Hex literals are floating only with a `.` or binary exponent `p`;
/// decimal ones with a `.` or exponent `e`.
fn is_floating_literal(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("0x") {
        lower.contains('.') || lower.contains('p')
    } else {
        lower.contains('.') || lower.contains('e')
    }
}
