//! C frontend using Tree-sitter.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::Path;
use tree_sitter::{Language, Node, Parser};

use ground_rule_core::{Frontend, ParseError, SyntaxTree};

use crate::comments::scan_comments;
use crate::lower::Lowerer;

/// Parses C sources into the ground-rule syntax model.
///
/// Headers are not expanded: the model holds exactly what the file itself
/// declares, and every node carries the file's path.
pub struct CFrontend {
    language: Language,
}

impl CFrontend {
    /// Creates a new C frontend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_c::LANGUAGE.into(),
        }
    }
}

impl Default for CFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for CFrontend {
    fn language_id(&self) -> &'static str {
        "c"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".c", ".h"]
    }

    fn parse(&self, path: &Path, source: &str) -> Result<SyntaxTree, ParseError> {
        let scan = scan_comments(source);
        let text = match scan.unterminated {
            Some(offset) => Cow::Owned(blank_from(source, offset)),
            None => Cow::Borrowed(source),
        };

        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(format!("failed to load C grammar: {e}")))?;

        let tree = parser
            .parse(text.as_ref(), None)
            .ok_or_else(|| ParseError::new("parser returned no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let broken = error_lines(root);
            let total = source.lines().count().max(1);
            if broken.len() * 2 > total {
                return Err(first_error(root));
            }
            tracing::warn!(
                "{}: skipping {} of {} line(s) with syntax errors",
                path.display(),
                broken.len(),
                total
            );
        }

        tracing::trace!("Lowering {} ({} bytes)", path.display(), source.len());
        Ok(Lowerer::new(path, text.as_bytes()).lower(&tree, scan.comments))
    }
}

/// Replaces everything from `offset` on with spaces, keeping line breaks.
fn blank_from(source: &str, offset: usize) -> String {
    let mut text = String::with_capacity(source.len());
    text.push_str(&source[..offset]);
    text.extend(
        source[offset..]
            .chars()
            .map(|c| if c == '\n' { '\n' } else { ' ' }),
    );
    text
}

/// Lines covered by ERROR nodes or holding a MISSING node.
fn error_lines(root: Node<'_>) -> BTreeSet<usize> {
    let mut lines = BTreeSet::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.is_error() {
            lines.extend(node.start_position().row..=node.end_position().row);
        } else if node.is_missing() {
            lines.insert(node.start_position().row);
        } else if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return lines;
            }
        }
    }
}

/// Locates the first ERROR or MISSING node in document order.
fn first_error(root: Node<'_>) -> ParseError {
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        let line = node.start_position().row + 1;
        if node.is_missing() {
            return ParseError::at_line(format!("missing `{}`", node.kind()), line);
        }
        if node.is_error() {
            return ParseError::at_line("syntax error", line);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return ParseError::new("syntax error");
            }
        }
    }
}
