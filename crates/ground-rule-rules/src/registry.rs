//! The full set of ground rules, in reporting order.

use ground_rule_core::{RuleBox, TitleRuleBox};

use crate::{
    CommentStyle, CommitTitle, EnumTypedefSuffix, FunctionNaming, IndentDepth, SmallEnum,
    UninitLocal, VoidFunction,
};

/// Name, code and description of one registered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Kebab-case rule name.
    pub name: &'static str,
    /// Rule code.
    pub code: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Returns every per-file rule, in the order their findings are reported.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(VoidFunction::new()),
        Box::new(FunctionNaming::new()),
        Box::new(IndentDepth::new()),
        Box::new(SmallEnum::new()),
        Box::new(EnumTypedefSuffix::new()),
        Box::new(CommentStyle::new()),
        Box::new(UninitLocal::new()),
    ]
}

/// Returns every commit-title rule.
#[must_use]
pub fn all_title_rules() -> Vec<TitleRuleBox> {
    vec![Box::new(CommitTitle::new())]
}

/// Describes every registered rule, per-file rules first.
#[must_use]
pub fn rule_catalog() -> Vec<RuleInfo> {
    let files = all_rules().into_iter().map(|r| RuleInfo {
        name: r.name(),
        code: r.code(),
        description: r.description(),
    });
    let titles = all_title_rules().into_iter().map(|r| RuleInfo {
        name: r.name(),
        code: r.code(),
        description: r.description(),
    });
    files.chain(titles).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_rules_count() {
        assert_eq!(all_rules().len(), 7);
        assert_eq!(all_title_rules().len(), 1);
    }

    #[test]
    fn catalog_is_ordered_and_unique() {
        let catalog = rule_catalog();
        let codes: Vec<&str> = catalog.iter().map(|r| r.code).collect();
        assert_eq!(
            codes,
            vec!["GR001", "GR002", "GR003", "GR004", "GR005", "GR006", "GR007", "GR008"]
        );

        let names: HashSet<&str> = catalog.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), catalog.len());
        assert!(catalog.iter().all(|r| !r.description.is_empty()));
    }
}
