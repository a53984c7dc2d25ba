//! Rule checking the shape of a commit title.
//!
//! # Rationale
//!
//! A consistent title format keeps `git log --oneline` scannable.
//!
//! # Accepted Titles
//!
//! - Titles starting with an uppercase character that contain no `:`
//!   (`Fix race in timer setup`)
//! - Titles containing a module prefix, `module: ` or `module: sub: `
//!   (`net: fix race`, `net: tcp: Fix race`)
//!
//! Everything else, including the empty title, is reported. Characters
//! without case (digits, punctuation) count as uppercase.

use ground_rule_core::{TitleRule, TitleVerdict};
use regex::Regex;

/// Rule code for commit-title.
pub const CODE: &str = "GR008";

/// Rule name for commit-title.
pub const NAME: &str = "commit-title";

const MODULE_PREFIX: &str = r"(?:(?:\w+:)|(?:\w+: \w+:)) ";

/// Message reported for a malformed title.
pub const MALFORMED_MESSAGE: &str =
    "Commit title should start with an uppercase letter or `module_name:`";

/// Checks commit titles.
#[derive(Debug, Clone)]
pub struct CommitTitle {
    module_prefix: Regex,
}

impl Default for CommitTitle {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitTitle {
    /// Creates a new rule.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            module_prefix: Regex::new(MODULE_PREFIX).expect("valid regex"),
        }
    }
}

fn starts_uppercase(title: &str) -> bool {
    title
        .chars()
        .next()
        .is_some_and(|c| c.to_uppercase().eq(std::iter::once(c)))
}

impl TitleRule for CommitTitle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Commit titles start uppercase or with a module prefix"
    }

    fn check_title(&self, title: &str) -> TitleVerdict {
        if title.is_empty() {
            return TitleVerdict::Empty;
        }
        if starts_uppercase(title) && !title.contains(':') {
            return TitleVerdict::Pass;
        }
        if self.module_prefix.is_match(title) {
            return TitleVerdict::Pass;
        }
        TitleVerdict::Malformed {
            message: MALFORMED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(title: &str) -> TitleVerdict {
        CommitTitle::new().check_title(title)
    }

    #[test]
    fn empty_title() {
        assert_eq!(verdict(""), TitleVerdict::Empty);
    }

    #[test]
    fn uppercase_without_colon_passes() {
        assert!(verdict("Fix bug").is_pass());
        assert!(verdict("Ümlaut first").is_pass());
        assert!(verdict("42 is the answer").is_pass());
    }

    #[test]
    fn module_prefix_passes() {
        assert!(verdict("module: fix bug").is_pass());
        assert!(verdict("net: tcp: Fix retransmit").is_pass());
        assert!(verdict("Revert net: fix bug").is_pass());
        assert!(verdict("driver_x: Add probe").is_pass());
    }

    #[test]
    fn malformed_titles() {
        for title in ["fix bug", "module:fix", "wip - done", "fix:bug and more", "Note:nothing"] {
            assert!(
                matches!(verdict(title), TitleVerdict::Malformed { .. }),
                "{title:?} should be malformed"
            );
        }
    }
}
