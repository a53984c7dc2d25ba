//! # ground-rule
//!
//! Ground-rule checker for C sources.
//!
//! This is the facade crate: it re-exports the core model, the built-in
//! rules and the C frontend, and wires them together in [`run`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ground_rule::{run, DetectorConfig};
//! use std::path::PathBuf;
//!
//! let files = vec![PathBuf::from("/work/src/timer.c")];
//! let report = run(Some("timer: Fix overflow"), &files, DetectorConfig::default())?;
//! print!("{}", report.render_text());
//! ```
//!
//! ## Custom Rule Sets
//!
//! ```rust,ignore
//! use ground_rule::{Analyzer, CFrontend};
//! use ground_rule::rules::{CommentStyle, UninitLocal};
//!
//! let analyzer = Analyzer::builder()
//!     .frontend(CFrontend::new())
//!     .rule(CommentStyle::new())
//!     .rule(UninitLocal::new())
//!     .build()?;
//! let report = analyzer.analyze(None, &files);
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use ground_rule_core::*;

pub use ground_rule_c::CFrontend;

/// Built-in rules and the rule registry.
pub mod rules {
    pub use ground_rule_rules::*;
}

mod runner;

pub use runner::{analyzer, run};
