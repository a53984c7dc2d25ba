//! Rule traits for defining ground rules.

use serde::Serialize;

use crate::context::FileContext;
use crate::syntax::SyntaxTree;
use crate::types::{Finding, Severity};

/// A per-file ground rule over the syntax model.
///
/// Rules are stateless: everything they need arrives through the
/// [`FileContext`] and the parsed [`SyntaxTree`], so one instance can be run
/// against any number of files, in any order.
///
/// # Example
///
/// ```ignore
/// use ground_rule_core::{FileContext, Finding, Location, NodeKind, Rule, SyntaxTree};
///
/// pub struct NoMainFunction;
///
/// impl Rule for NoMainFunction {
///     fn name(&self) -> &'static str { "no-main-function" }
///     fn code(&self) -> &'static str { "GR100" }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding> {
///         tree.top_level(NodeKind::FunctionDecl, ctx.path)
///             .filter(|f| f.spelling == "main")
///             .map(|f| Finding::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 Location::line(ctx.path, f.line),
///                 "main is not allowed here",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "void-function").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "GR001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    /// Checks a single file and returns any findings.
    ///
    /// An empty vector means the file is clean. Unexpected node shapes are
    /// treated as "no match", never as failures.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Outcome of linting a commit title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum TitleVerdict {
    /// The title follows the convention.
    Pass,
    /// The title is empty.
    Empty,
    /// The title breaks the convention.
    Malformed {
        /// Explanation shown to the user.
        message: String,
    },
}

impl TitleVerdict {
    /// Returns true if the title was accepted.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// A rule over a single commit title, independent of any source file.
pub trait TitleRule: Send + Sync {
    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns the rule code.
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Lints one title. Never fails: every input yields a verdict.
    fn check_title(&self, title: &str) -> TitleVerdict;
}

/// Type alias for boxed `TitleRule` trait objects.
pub type TitleRuleBox = Box<dyn TitleRule>;
