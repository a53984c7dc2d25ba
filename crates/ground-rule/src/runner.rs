//! Wiring of the C frontend and the full rule registry.

use ground_rule_c::CFrontend;
use ground_rule_core::{Analyzer, AnalyzerError, DetectorConfig, Report};
use ground_rule_rules::{all_rules, all_title_rules};
use std::path::PathBuf;

/// Builds an analyzer with the C frontend and every built-in rule.
///
/// # Errors
///
/// Returns [`AnalyzerError::Config`] if `config` names a rule that does not
/// exist.
pub fn analyzer(config: DetectorConfig) -> Result<Analyzer, AnalyzerError> {
    let mut builder = Analyzer::builder().frontend(CFrontend::new()).config(config);
    for rule in all_rules() {
        builder = builder.rule_box(rule);
    }
    for rule in all_title_rules() {
        builder = builder.title_rule_box(rule);
    }
    builder.build()
}

/// Lints `commit_title` (when given) and every file in `files`, in order.
///
/// Files that cannot be read or parsed are recorded in the report and do
/// not stop the run.
///
/// # Errors
///
/// Fails before any file is touched if `config` is inconsistent with the
/// rule registry.
pub fn run(
    commit_title: Option<&str>,
    files: &[PathBuf],
    config: DetectorConfig,
) -> Result<Report, AnalyzerError> {
    let analyzer = analyzer(config)?;
    tracing::debug!("Running {} rules", analyzer.rule_count());
    Ok(analyzer.analyze(commit_title, files))
}
