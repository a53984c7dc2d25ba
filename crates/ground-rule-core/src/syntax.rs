//! Language-neutral syntax model consumed by rules.
//!
//! A [`SyntaxTree`] is produced once per file by a [`Frontend`](crate::Frontend)
//! and is read-only afterwards. Rules never see parser-specific types; they
//! match on [`NodeKind`] and read spelling, type and location data only.

use std::path::Path;
use std::sync::Arc;

/// Category of a syntax node.
///
/// Only the categories the ground rules inspect are distinguished; everything
/// else lowers to [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of one parsed file.
    TranslationUnit,
    /// Function definition or prototype.
    FunctionDecl,
    /// C++ constructor.
    Constructor,
    /// C++ destructor.
    Destructor,
    /// Function parameter.
    ParmDecl,
    /// Variable declaration.
    VarDecl,
    /// Declaration statement inside a block.
    DeclStmt,
    /// `{ ... }` block.
    CompoundStmt,
    /// `enum` with a body.
    EnumDecl,
    /// One enumerator inside an `enum` body.
    EnumConstantDecl,
    /// `typedef` declaration.
    TypedefDecl,
    /// `struct` or `union` with a body.
    RecordDecl,
    /// Integer literal (`42`, `0x2a`).
    IntegerLiteral,
    /// Floating literal (`1.5`, `2e3f`).
    FloatingLiteral,
    /// String literal.
    StringLiteral,
    /// Character literal.
    CharacterLiteral,
    /// Function call.
    CallExpr,
    /// `(type) expr` cast.
    CStyleCastExpr,
    /// Binary operator, including plain assignment.
    BinaryOperator,
    /// Unary operator (`-x`, `&x`, `!x`).
    UnaryOperator,
    /// `( expr )`.
    ParenExpr,
    /// Implicit conversion inserted around a value read.
    ImplicitExpr,
    /// Reference to a declared name.
    DeclRefExpr,
    /// `{ a, b }` initializer list.
    InitListExpr,
    /// Anything else.
    Other,
}

impl NodeKind {
    /// Returns true for expression kinds that count as an initializer value.
    ///
    /// This is a presence test over a fixed kind set: initializers built from
    /// other forms (unary operators, initializer lists, conditionals, `sizeof`)
    /// are not recognised.
    #[must_use]
    pub fn is_initializer(self) -> bool {
        matches!(
            self,
            Self::CStyleCastExpr
                | Self::CallExpr
                | Self::IntegerLiteral
                | Self::FloatingLiteral
                | Self::StringLiteral
                | Self::ImplicitExpr
                | Self::ParenExpr
                | Self::BinaryOperator
        )
    }
}

/// Canonical category of a type after typedef aliases are stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `void`.
    Void,
    /// Arithmetic builtin (`int`, `unsigned long`, `double`, ...).
    Builtin,
    /// Pointer type.
    Pointer,
    /// Array type.
    Array,
    /// `struct` or `union`.
    Record,
    /// `enum`.
    Enum,
    /// Function type.
    Function,
    /// Could not be resolved (e.g. a typedef from an unparsed header).
    Unknown,
}

/// Declared type of a node: its source spelling plus canonical kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    /// Type as spelled, e.g. `"void"`, `"const char *"`.
    pub spelling: String,
    /// Canonical kind.
    pub canonical: TypeKind,
}

impl DeclaredType {
    /// Creates a declared type.
    #[must_use]
    pub fn new(spelling: impl Into<String>, canonical: TypeKind) -> Self {
        Self {
            spelling: spelling.into(),
            canonical,
        }
    }
}

/// First and last source line covered by a node (1-indexed, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// First line.
    pub start_line: usize,
    /// Last line.
    pub end_line: usize,
}

/// One node of a parsed translation unit.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    /// Node category.
    pub kind: NodeKind,
    /// Identifier, or empty when the node has none.
    pub spelling: String,
    /// For functions the return type; for variables and typedefs the declared type.
    pub declared_type: Option<DeclaredType>,
    /// File that owns this node.
    pub source_file: Arc<Path>,
    /// Line of the node's name (1-indexed).
    pub line: usize,
    /// Lines covered by the node.
    pub extent: Extent,
    /// Children in source order.
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Creates a childless node spanning a single line.
    #[must_use]
    pub fn new(
        kind: NodeKind,
        spelling: impl Into<String>,
        source_file: Arc<Path>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            declared_type: None,
            source_file,
            line,
            extent: Extent {
                start_line: line,
                end_line: line,
            },
            children: Vec::new(),
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub fn with_type(mut self, declared_type: DeclaredType) -> Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// Sets the line extent.
    #[must_use]
    pub fn with_extent(mut self, start_line: usize, end_line: usize) -> Self {
        self.extent = Extent {
            start_line,
            end_line,
        };
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Iterates over direct children of the given kind.
    pub fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Spelling of the declared type, or `""` when the node has none.
    #[must_use]
    pub fn type_spelling(&self) -> &str {
        self.declared_type
            .as_ref()
            .map_or("", |t| t.spelling.as_str())
    }

    /// Canonical kind of the declared type, if any.
    #[must_use]
    pub fn canonical_type(&self) -> Option<TypeKind> {
        self.declared_type.as_ref().map(|t| t.canonical)
    }

    /// Returns true if this node belongs to `path`.
    #[must_use]
    pub fn is_from(&self, path: &Path) -> bool {
        &*self.source_file == path
    }
}

/// A comment token from the translation unit's token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentToken {
    /// Raw spelling, delimiters included.
    pub text: String,
    /// Line the comment starts on (1-indexed).
    pub line: usize,
}

/// A parsed translation unit.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
    comments: Vec<CommentToken>,
}

impl SyntaxTree {
    /// Creates a tree from its root node and comment stream.
    #[must_use]
    pub fn new(root: SyntaxNode, comments: Vec<CommentToken>) -> Self {
        Self { root, comments }
    }

    /// The translation-unit node.
    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Comment tokens in source order.
    pub fn comments(&self) -> impl Iterator<Item = &CommentToken> {
        self.comments.iter()
    }

    /// Direct children of the root that have `kind` and belong to `path`.
    ///
    /// Nodes pulled in from other files (headers) are skipped.
    pub fn top_level<'a>(
        &'a self,
        kind: NodeKind,
        path: &'a Path,
    ) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.root
            .children
            .iter()
            .filter(move |n| n.kind == kind && n.is_from(path))
    }
}
