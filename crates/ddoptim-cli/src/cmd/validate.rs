use clap::Args;
use serde::Serialize;
use std::io::Write;

use super::Project;
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ValidateArgs {}

#[derive(Debug, Serialize)]
struct ValidationReport {
    path: String,
    valid: bool,
    findings: Vec<String>,
}

/// Print validation findings; any finding makes the command fail.
pub fn run_validate(
    _args: &ValidateArgs,
    output: OutputMode,
    project: &Project,
) -> anyhow::Result<()> {
    let (path, network) = project.load(output)?;
    let findings = network.validate();
    let report = ValidationReport {
        path: path.display().to_string(),
        valid: findings.is_empty(),
        findings,
    };

    render_mode(
        output,
        &report,
        |r, w| render_validate_text(r, w),
        |r, w| render_validate_pretty(r, w),
    )?;

    if !report.valid {
        anyhow::bail!("{} validation finding(s)", report.findings.len());
    }
    Ok(())
}

fn render_validate_pretty(report: &ValidationReport, w: &mut dyn Write) -> std::io::Result<()> {
    if report.valid {
        return writeln!(w, "✓ {} is valid", report.path);
    }
    pretty_section(
        w,
        &format!("{} finding(s) in {}", report.findings.len(), report.path),
    )?;
    for finding in &report.findings {
        writeln!(w, "  ✗ {finding}")?;
    }
    Ok(())
}

fn render_validate_text(report: &ValidationReport, w: &mut dyn Write) -> std::io::Result<()> {
    if report.valid {
        return writeln!(w, "valid");
    }
    for finding in &report.findings {
        writeln!(w, "{finding}")?;
    }
    Ok(())
}
