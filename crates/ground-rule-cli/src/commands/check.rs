//! Check command implementation.

use anyhow::{Context, Result};
use ground_rule::DetectorConfig;
use std::process::ExitCode;

use crate::CheckArgs;

/// Runs the check command.
pub fn run(args: &CheckArgs) -> Result<ExitCode> {
    let config = build_config(args)?;
    tracing::debug!(
        "indent_limit={}, enum_element_min={}",
        config.indent_limit,
        config.enum_element_min
    );
    let report = ground_rule::run(args.title.as_deref(), &args.files, config)
        .context("Failed to set up checker")?;

    super::output::print(&report, args.format)?;

    if args.strict && report.has_problems() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Maps command-line flags onto a validated configuration.
fn build_config(args: &CheckArgs) -> Result<DetectorConfig> {
    let mut builder = DetectorConfig::builder();

    if let Some(limit) = args.indent_limit {
        builder = builder.indent_limit(limit);
    }
    if let Some(min) = args.enum_min {
        builder = builder.enum_element_min(min);
    }
    if !args.rules.is_empty() {
        let names = args.rules.iter().map(|r| r.trim()).filter(|r| !r.is_empty());
        builder = builder.enable_only(names);
    }
    for name in &args.disable {
        builder = builder.disable(name.trim());
    }

    builder.build().context("Invalid configuration")
}
