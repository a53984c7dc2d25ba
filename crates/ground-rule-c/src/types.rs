//! Type spelling and canonical-kind resolution for C declarations.

use std::collections::HashMap;
use tree_sitter::Node;

use ground_rule_core::TypeKind;

/// Canonical kinds of the typedef names seen so far in one translation unit.
#[derive(Debug, Default)]
pub(crate) struct TypedefTable {
    kinds: HashMap<String, TypeKind>,
}

impl TypedefTable {
    pub(crate) fn insert(&mut self, name: &str, kind: TypeKind) {
        self.kinds.insert(name.to_owned(), kind);
    }

    pub(crate) fn get(&self, name: &str) -> Option<TypeKind> {
        self.kinds.get(name).copied()
    }
}

/// Type-building step between a declarator's name and its base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Derivation {
    Pointer,
    Array,
    Function,
}

/// A declarator reduced to its name plus the derivations applied to the base type.
///
/// `derivations` is ordered from the outermost declarator inwards, so the
/// last entry is the one closest to the name and decides the canonical kind.
#[derive(Debug)]
pub(crate) struct Declarator<'tree> {
    pub(crate) name: Option<Node<'tree>>,
    pub(crate) derivations: Vec<Derivation>,
    /// Array bound expressions in source order.
    pub(crate) sizes: Vec<Node<'tree>>,
}

impl Declarator<'_> {
    /// Canonical kind of the declared entity given the base type's kind.
    pub(crate) fn canonical(&self, base: TypeKind) -> TypeKind {
        match self.derivations.last() {
            Some(Derivation::Pointer) => TypeKind::Pointer,
            Some(Derivation::Array) => TypeKind::Array,
            Some(Derivation::Function) => TypeKind::Function,
            None => base,
        }
    }

    /// Number of pointer levels, for spelling.
    pub(crate) fn pointer_depth(&self) -> usize {
        self.derivations
            .iter()
            .filter(|d| **d == Derivation::Pointer)
            .count()
    }
}

/// Walks a declarator down to its identifier.
pub(crate) fn unwrap_declarator(node: Node<'_>) -> Declarator<'_> {
    let mut derivations = Vec::new();
    let mut sizes = Vec::new();
    let mut current = Some(node);

    while let Some(n) = current {
        let next = match n.kind() {
            "identifier" | "type_identifier" | "field_identifier" | "primitive_type" => {
                return Declarator {
                    name: Some(n),
                    derivations,
                    sizes,
                };
            }
            "pointer_declarator" => {
                derivations.push(Derivation::Pointer);
                n.child_by_field_name("declarator")
            }
            "array_declarator" => {
                derivations.push(Derivation::Array);
                if let Some(size) = n.child_by_field_name("size") {
                    sizes.insert(0, size);
                }
                n.child_by_field_name("declarator")
            }
            "function_declarator" => {
                derivations.push(Derivation::Function);
                n.child_by_field_name("declarator")
            }
            "init_declarator" => n.child_by_field_name("declarator"),
            "parenthesized_declarator" | "attributed_declarator" => n.named_child(0),
            _ => None,
        };
        current = next;
    }

    Declarator {
        name: None,
        derivations,
        sizes,
    }
}

/// A function declarator: the function's name node, its parameter list and
/// how many pointer levels wrap the return type.
pub(crate) struct FunctionShape<'tree> {
    pub(crate) name: Node<'tree>,
    pub(crate) parameters: Option<Node<'tree>>,
    pub(crate) return_pointer_depth: usize,
}

/// Recognises `name(params)` declarators, optionally behind pointer levels
/// of the return type. Function pointers (`(*fp)(int)`) are not functions.
pub(crate) fn function_shape(node: Node<'_>) -> Option<FunctionShape<'_>> {
    let mut depth = 0;
    let mut current = node;

    loop {
        match current.kind() {
            "pointer_declarator" => {
                depth += 1;
                current = current.child_by_field_name("declarator")?;
            }
            "attributed_declarator" => current = current.named_child(0)?,
            "function_declarator" => {
                let inner = current.child_by_field_name("declarator")?;
                return (inner.kind() == "identifier").then(|| FunctionShape {
                    name: inner,
                    parameters: current.child_by_field_name("parameters"),
                    return_pointer_depth: depth,
                });
            }
            _ => return None,
        }
    }
}

/// Canonical kind of a type specifier node.
pub(crate) fn specifier_kind(node: Node<'_>, src: &[u8], typedefs: &TypedefTable) -> TypeKind {
    match node.kind() {
        "primitive_type" => {
            if node_text(node, src) == "void" {
                TypeKind::Void
            } else {
                TypeKind::Builtin
            }
        }
        "sized_type_specifier" => TypeKind::Builtin,
        "enum_specifier" => TypeKind::Enum,
        "struct_specifier" | "union_specifier" => TypeKind::Record,
        "type_identifier" => typedefs
            .get(node_text(node, src))
            .unwrap_or(TypeKind::Unknown),
        _ => TypeKind::Unknown,
    }
}

/// Source spelling of a type specifier, without tag bodies.
pub(crate) fn specifier_spelling(node: Node<'_>, src: &[u8]) -> String {
    match node.kind() {
        "enum_specifier" | "struct_specifier" | "union_specifier" => {
            let keyword = node.kind().trim_end_matches("_specifier");
            match node.child_by_field_name("name") {
                Some(name) => format!("{keyword} {}", node_text(name, src)),
                None => format!("{keyword} (anonymous)"),
            }
        }
        _ => node_text(node, src)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Full spelling: qualifiers, base type, then one `*` per pointer level.
pub(crate) fn full_spelling(qualifiers: &[&str], base: &str, pointer_depth: usize) -> String {
    let mut spelling = qualifiers.join(" ");
    if !spelling.is_empty() {
        spelling.push(' ');
    }
    spelling.push_str(base);
    if pointer_depth > 0 {
        spelling.push(' ');
        spelling.push_str(&"*".repeat(pointer_depth));
    }
    spelling
}

/// `type_qualifier` children of a declaration (`const`, `volatile`, ...).
pub(crate) fn qualifiers<'src>(node: Node<'_>, src: &'src [u8]) -> Vec<&'src str> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == "type_qualifier")
        .map(|c| node_text(c, src))
        .collect()
}

/// UTF-8 text of a node, or `""` if the bytes are not valid UTF-8.
pub(crate) fn node_text<'src>(node: Node<'_>, src: &'src [u8]) -> &'src str {
    node.utf8_text(src).unwrap_or("")
}
