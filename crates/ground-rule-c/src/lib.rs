//! # ground-rule-c
//!
//! Tree-sitter based C frontend for ground-rule.
//!
//! [`CFrontend`] parses one C file with `tree-sitter-c` and lowers the
//! concrete syntax into the [`SyntaxTree`](ground_rule_core::SyntaxTree)
//! model the rules inspect:
//!
//! - function definitions and prototypes become `FunctionDecl`s carrying
//!   their return-type spelling, `ParmDecl`s and body
//! - `#if`/`#ifdef` blocks and `extern "C"` blocks are flattened, so guarded
//!   declarations stay top level
//! - typedef names resolve to a canonical [`TypeKind`](ground_rule_core::TypeKind)
//!   through earlier typedefs in the same file
//! - every comment is collected, in document order, as a
//!   [`CommentToken`](ground_rule_core::CommentToken) by a lexical scan of
//!   the source, preprocessor lines included
//!
//! Includes are never expanded. Syntax errors are skipped and the complete
//! items around them are still lowered. A file where more than half of the
//! lines are covered by syntax errors is rejected with a
//! [`ParseError`](ground_rule_core::ParseError).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod comments;
mod frontend;
mod lower;
mod types;

pub use frontend::CFrontend;
