//! Helpers shared by the rule tests.

use std::path::Path;

use ground_rule_c::CFrontend;
use ground_rule_core::{
    split_lines, DetectorConfig, FileContext, Finding, Frontend, Rule, SyntaxNode, SyntaxTree,
};

/// Path every fixture is parsed as.
pub const TEST_FILE: &str = "/src/test.c";

/// Parses `src` as C and runs `rule` with the default configuration.
pub fn check_c(rule: &dyn Rule, src: &str) -> Vec<Finding> {
    check_c_with(rule, src, &DetectorConfig::default())
}

/// Parses `src` as C and runs `rule` with `config`.
pub fn check_c_with(rule: &dyn Rule, src: &str, config: &DetectorConfig) -> Vec<Finding> {
    let path = Path::new(TEST_FILE);
    let tree = CFrontend::new()
        .parse(path, src)
        .expect("fixture should parse");
    let lines = split_lines(src);
    rule.check(&FileContext::new(path, &lines, config), &tree)
}

/// Runs `rule` on a hand-built tree with no source lines.
pub fn check_tree(rule: &dyn Rule, root: SyntaxNode) -> Vec<Finding> {
    let config = DetectorConfig::default();
    let tree = SyntaxTree::new(root, Vec::new());
    rule.check(&FileContext::new(Path::new(TEST_FILE), &[], &config), &tree)
}

/// Symbols of `findings`, in order.
pub fn symbols(findings: &[Finding]) -> Vec<&str> {
    findings
        .iter()
        .filter_map(|f| f.symbol.as_deref())
        .collect()
}
