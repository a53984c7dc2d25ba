//! # ground-rule-rules
//!
//! Built-in ground rules for C sources and commit titles.
//!
//! Each rule is a stateless detector over the
//! [`SyntaxTree`](ground_rule_core::SyntaxTree) of one file (or, for
//! `commit-title`, over a single string) and reports
//! [`Finding`](ground_rule_core::Finding)s with informational severity.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | GR001 | `void-function` | Functions should return a status instead of `void` |
//! | GR002 | `function-naming` | Function names must be snake_case |
//! | GR003 | `indent-depth` | Limits tab indentation depth inside functions |
//! | GR004 | `small-enum` | Enums need at least `enum_element_min` constants |
//! | GR005 | `enum-typedef-suffix` | Typedefs of enums must end with `_e` |
//! | GR006 | `comment-style` | Comments must use the `/* ... */` block form |
//! | GR007 | `uninit-local` | Local variables must be initialized at declaration |
//! | GR008 | `commit-title` | Commit titles start uppercase or with `module:` |
//!
//! ## Usage
//!
//! ```ignore
//! use ground_rule_core::Analyzer;
//! use ground_rule_rules::{all_rules, all_title_rules};
//!
//! let mut builder = Analyzer::builder().frontend(CFrontend::new());
//! for rule in all_rules() {
//!     builder = builder.rule_box(rule);
//! }
//! for rule in all_title_rules() {
//!     builder = builder.title_rule_box(rule);
//! }
//! let analyzer = builder.build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod comment_style;
mod commit_title;
mod enum_typedef_suffix;
mod function_naming;
mod indent_depth;
mod registry;
mod small_enum;
mod uninit_local;
mod void_function;

#[cfg(test)]
mod test_support;

pub use comment_style::CommentStyle;
pub use commit_title::CommitTitle;
pub use enum_typedef_suffix::EnumTypedefSuffix;
pub use function_naming::FunctionNaming;
pub use indent_depth::IndentDepth;
pub use registry::{all_rules, all_title_rules, rule_catalog, RuleInfo};
pub use small_enum::SmallEnum;
pub use uninit_local::UninitLocal;
pub use void_function::VoidFunction;

/// Re-export core types for convenience.
pub use ground_rule_core::{Finding, Rule, Severity, TitleRule, TitleVerdict};
