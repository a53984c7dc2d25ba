//! Core analyzer for orchestrating ground-rule checks.

use crate::config::{ConfigError, DetectorConfig};
use crate::context::{split_lines, FileContext};
use crate::frontend::{Frontend, FrontendBox};
use crate::report::{FileReport, FileStatus, Report, TitleReport};
use crate::rule::{Rule, RuleBox, TitleRule, TitleRuleBox};

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while setting up an analyzer.
///
/// Per-file problems never surface here; they are recorded in the [`Report`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No frontend was supplied.
    #[error("No frontend configured")]
    NoFrontend,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    frontend: Option<FrontendBox>,
    rules: Vec<RuleBox>,
    title_rules: Vec<TitleRuleBox>,
    config: Option<DetectorConfig>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parser frontend.
    #[must_use]
    pub fn frontend<F: Frontend + 'static>(mut self, frontend: F) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a commit-title rule to the analyzer.
    #[must_use]
    pub fn title_rule<R: TitleRule + 'static>(mut self, rule: R) -> Self {
        self.title_rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed commit-title rule to the analyzer.
    #[must_use]
    pub fn title_rule_box(mut self, rule: TitleRuleBox) -> Self {
        self.title_rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: DetectorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no frontend was set or if the configuration names
    /// a rule that was not registered.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let frontend = self.frontend.ok_or(AnalyzerError::NoFrontend)?;
        let config = self.config.unwrap_or_default();

        for name in config.referenced_rules() {
            let known = self.rules.iter().any(|r| r.name() == name)
                || self.title_rules.iter().any(|r| r.name() == name);
            if !known {
                return Err(ConfigError::UnknownRule {
                    name: name.to_owned(),
                }
                .into());
            }
        }

        Ok(Analyzer {
            frontend,
            rules: self.rules,
            title_rules: self.title_rules,
            config,
        })
    }
}

/// The checker that orchestrates one run.
///
/// A run lints the commit title once, then processes files strictly in the
/// given order: read, parse, run every enabled rule against the same tree,
/// record the file's entry. Nothing is carried from one file to the next.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    frontend: FrontendBox,
    rules: Vec<RuleBox>,
    title_rules: Vec<TitleRuleBox>,
    config: DetectorConfig,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len() + self.title_rules.len()
    }

    /// Names of the registered rules that the configuration enables.
    #[must_use]
    pub fn enabled_rule_names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|r| r.name())
            .chain(self.title_rules.iter().map(|r| r.name()))
            .filter(|name| self.config.is_rule_enabled(name))
            .collect()
    }

    /// Runs the title check and every file, returning the full report.
    ///
    /// Never fails: unreadable and unparsable files are itemized in the
    /// report and the run continues with the next file.
    #[must_use]
    pub fn analyze(&self, commit_title: Option<&str>, files: &[PathBuf]) -> Report {
        info!(
            "Checking {} file(s) with {} rule(s) via {} frontend",
            files.len(),
            self.rule_count(),
            self.frontend.language_id()
        );

        let mut report = Report::new();

        if let Some(title) = commit_title {
            report.title = self.check_title(title);
        }

        for path in files {
            report.files.push(self.analyze_file(path));
        }

        info!(
            "Check complete: {} finding(s), {} failed file(s)",
            report.total_findings(),
            report.failed_files().count()
        );

        report
    }

    /// Lints the commit title with the first enabled title rule.
    fn check_title(&self, title: &str) -> Option<TitleReport> {
        let rule = self
            .title_rules
            .iter()
            .find(|r| self.config.is_rule_enabled(r.name()))?;

        let verdict = rule.check_title(title);
        debug!("Title checked by {}: {:?}", rule.name(), verdict);

        Some(TitleReport {
            title: title.replace('\n', ""),
            rule: rule.name().to_owned(),
            verdict,
        })
    }

    fn handles_extension(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        self.frontend
            .extensions()
            .iter()
            .any(|ext| name.ends_with(ext))
    }

    /// Analyzes a single file.
    fn analyze_file(&self, path: &Path) -> FileReport {
        debug!("Analyzing: {}", path.display());
        if !self.handles_extension(path) {
            debug!(
                "{} has no {} extension, parsing anyway",
                path.display(),
                self.frontend.language_id()
            );
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return FileReport {
                    path: path.to_path_buf(),
                    status: FileStatus::Unreadable {
                        reason: e.to_string(),
                    },
                };
            }
        };

        let tree = match self.frontend.parse(path, &content) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                return FileReport {
                    path: path.to_path_buf(),
                    status: FileStatus::ParseFailed {
                        reason: e.to_string(),
                    },
                };
            }
        };
        debug!("Parsed: {}", path.display());

        let lines = split_lines(&content);
        let ctx = FileContext::new(path, &lines, &self.config);
        let mut findings = IndexMap::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_findings = rule.check(&ctx, &tree);
            debug!(
                "{} reported {} finding(s) in {}",
                rule.name(),
                rule_findings.len(),
                path.display()
            );
            if !rule_findings.is_empty() {
                findings.insert(rule.name().to_owned(), rule_findings);
            }
        }

        FileReport::checked(path, findings)
    }
}
