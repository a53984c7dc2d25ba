//! # ground-rule-core
//!
//! Core framework for checking C sources against a fixed set of ground rules.
//!
//! This crate is parser-independent. It provides:
//!
//! - [`SyntaxTree`] / [`SyntaxNode`], the read-only syntax model rules inspect
//! - [`Frontend`] trait for plugging in a parser that produces that model
//! - [`Rule`] trait for per-file rules and [`TitleRule`] for commit titles
//! - [`Analyzer`] for orchestrating a run
//! - [`Finding`] and [`Report`] for representing results
//!
//! ## Example
//!
//! ```ignore
//! use ground_rule_core::{Analyzer, DetectorConfig};
//!
//! let analyzer = Analyzer::builder()
//!     .frontend(MyFrontend::new())
//!     .rule(MyRule::new())
//!     .config(DetectorConfig::default())
//!     .build()?;
//!
//! let report = analyzer.analyze(Some("Fix bug"), &files);
//! print!("{}", report.render_text());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod frontend;
mod report;
mod rule;
mod syntax;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{
    ConfigError, DetectorConfig, DetectorConfigBuilder, DEFAULT_ENUM_ELEMENT_MIN,
    DEFAULT_INDENT_LIMIT,
};
pub use context::{split_lines, FileContext};
pub use frontend::{Frontend, FrontendBox, ParseError};
pub use report::{FileReport, FileStatus, Report, TitleReport};
pub use rule::{Rule, RuleBox, TitleRule, TitleRuleBox, TitleVerdict};
pub use syntax::{CommentToken, DeclaredType, Extent, NodeKind, SyntaxNode, SyntaxTree, TypeKind};
pub use types::{Finding, FindingDiagnostic, Location, Severity, Suggestion};
