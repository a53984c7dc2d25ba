//! Shared output formatting for check results.

use anyhow::Result;
use ground_rule::{FileStatus, Report};
use miette::NamedSource;
use std::path::Path;

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print!("{}", report.render_compact()),
        OutputFormat::Pretty => print_pretty(report),
    }
    Ok(())
}

fn print_text(report: &Report) {
    print!("{}", report.render_text());

    let failed = report.failed_files().count();
    let summary_color = if failed > 0 {
        "\x1b[31m"
    } else if report.has_problems() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} finding(s) in {} file(s), {} file(s) failed\x1b[0m",
        summary_color,
        report.total_findings(),
        report.files.len(),
        failed
    );
}

fn print_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_pretty(report: &Report) {
    print!("{}", report.render_title());

    for file in &report.files {
        let source = match &file.status {
            FileStatus::Checked { .. } => match reread(&file.path) {
                Some(source) => source,
                None => continue,
            },
            FileStatus::Unreadable { reason } | FileStatus::ParseFailed { reason } => {
                println!("{}: error {reason}", file.path.display());
                continue;
            }
        };

        let name = file.path.display().to_string();
        for finding in file.findings() {
            let diagnostic = miette::Report::new(finding.to_diagnostic(&source))
                .with_source_code(NamedSource::new(&name, source.clone()));
            println!("{diagnostic:?}");
        }
    }
}

/// Source text for rendering snippets. The file was read once already, so a
/// failure here is reported and the file's diagnostics are skipped.
fn reread(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::warn!("Cannot re-read {} for diagnostics: {e}", path.display());
            println!("{}: error cannot re-read file: {e}", path.display());
            None
        }
    }
}
