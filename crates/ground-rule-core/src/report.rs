//! Per-run report: title verdict plus one entry per analyzed file.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::rule::TitleVerdict;
use crate::types::Finding;

/// Result of linting the commit title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleReport {
    /// Title as given, with embedded newlines removed.
    pub title: String,
    /// Name of the title rule that produced the verdict.
    pub rule: String,
    /// The verdict.
    #[serde(flatten)]
    pub verdict: TitleVerdict,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Parsed and checked. Only rules with at least one finding appear,
    /// in registration order.
    Checked {
        /// Findings grouped by rule name.
        findings: IndexMap<String, Vec<Finding>>,
    },
    /// The file could not be read.
    Unreadable {
        /// Underlying error.
        reason: String,
    },
    /// The file could not be parsed.
    ParseFailed {
        /// Underlying error.
        reason: String,
    },
}

/// Report entry for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Path as given to the analyzer.
    pub path: PathBuf,
    /// Outcome.
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileReport {
    /// Creates an entry for a checked file.
    #[must_use]
    pub fn checked(path: impl Into<PathBuf>, findings: IndexMap<String, Vec<Finding>>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Checked { findings },
        }
    }

    /// Findings reported by one rule (empty if none or if the file failed).
    #[must_use]
    pub fn findings_for(&self, rule: &str) -> &[Finding] {
        match &self.status {
            FileStatus::Checked { findings } => findings.get(rule).map_or(&[], Vec::as_slice),
            _ => &[],
        }
    }

    /// All findings of this file in rule order.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        let groups = match &self.status {
            FileStatus::Checked { findings } => Some(findings.values()),
            _ => None,
        };
        groups.into_iter().flatten().flatten()
    }

    /// Returns true if the file was read and parsed.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        matches!(self.status, FileStatus::Checked { .. })
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Commit title verdict, if a title was checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleReport>,
    /// One entry per input file, in input order.
    pub files: Vec<FileReport>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the entry for a file.
    #[must_use]
    pub fn file(&self, path: &Path) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path)
    }

    /// All findings across files.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.files.iter().flat_map(FileReport::findings)
    }

    /// Number of findings across files.
    #[must_use]
    pub fn total_findings(&self) -> usize {
        self.findings().count()
    }

    /// Files that could not be read or parsed.
    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.is_checked())
    }

    /// Returns true if the title failed, any file failed, or any finding exists.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.title.as_ref().is_some_and(|t| !t.verdict.is_pass())
            || self.failed_files().next().is_some()
            || self.findings().next().is_some()
    }

    /// Renders the commit-title banner, or nothing when the title passed or
    /// was not checked.
    #[must_use]
    pub fn render_title(&self) -> String {
        let mut out = String::new();

        if let Some(title) = &self.title {
            match &title.verdict {
                TitleVerdict::Pass => {}
                TitleVerdict::Empty => {
                    let _ = writeln!(out, "== Failed to verify commit title (empty title) ==");
                    let _ = writeln!(out);
                }
                TitleVerdict::Malformed { message } => {
                    let _ = writeln!(out, "==== {} ====", title.title);
                    let _ = writeln!(out, "== {message} ==");
                    let _ = writeln!(out);
                }
            }
        }
        out
    }

    /// Renders the console layout: a banner per file, a heading per rule.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = self.render_title();

        for file in &self.files {
            let _ = writeln!(out, "==== {} ====", file.path.display());
            match &file.status {
                FileStatus::Checked { findings } => {
                    for (rule, list) in findings {
                        let _ = writeln!(out, "== {rule} ({} cases) ==", list.len());
                        for f in list {
                            let _ = writeln!(out, "  line {}: {}", f.location.line, f.message);
                        }
                    }
                }
                FileStatus::Unreadable { reason } => {
                    let _ = writeln!(out, "== UNREADABLE: {reason} ==");
                }
                FileStatus::ParseFailed { reason } => {
                    let _ = writeln!(out, "== PARSE FAILED: {reason} ==");
                }
            }
            let _ = writeln!(out);
        }

        out
    }

    /// Renders one `file:line:col: severity [code] message` line per finding.
    #[must_use]
    pub fn render_compact(&self) -> String {
        let mut out = String::new();
        for finding in self.findings() {
            let _ = writeln!(out, "{finding}");
        }
        for file in self.failed_files() {
            let reason = match &file.status {
                FileStatus::Unreadable { reason } | FileStatus::ParseFailed { reason } => reason,
                FileStatus::Checked { .. } => continue,
            };
            let _ = writeln!(out, "{}: error {reason}", file.path.display());
        }
        out
    }
}
