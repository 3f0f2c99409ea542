use clap::Args;
use ddoptim_core::{BufferProfile, default_profiles};
use serde::Serialize;
use std::io::Write;

use super::Project;
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ProfilesArgs {
    /// Show the lead-time factor each profile picks for this DLT (days).
    #[arg(long)]
    pub dlt: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ProfileRow {
    #[serde(flatten)]
    profile: BufferProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_factor: Option<f64>,
}

/// List buffer profiles from the network file, or the built-in table when
/// no network is configured.
pub fn run_profiles(
    args: &ProfilesArgs,
    output: OutputMode,
    project: &Project,
) -> anyhow::Result<()> {
    let profiles: Vec<BufferProfile> = if project.network_path().is_some() {
        let (_, network) = project.load(output)?;
        network.profiles().cloned().collect()
    } else {
        default_profiles().into_values().collect()
    };

    let rows: Vec<ProfileRow> = profiles
        .into_iter()
        .map(|profile| ProfileRow {
            selected_factor: args.dlt.map(|dlt| profile.select_lead_time_factor(dlt)),
            profile,
        })
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| render_profiles_text(rows, w),
        |rows, w| render_profiles_pretty(rows, w),
    )
}

fn render_profiles_pretty(rows: &[ProfileRow], w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Buffer profiles ({})", rows.len()))?;
    writeln!(
        w,
        "{:<6} {:>14} {:>16} {:>6} {:>8}",
        "NAME", "DLT S/M/L", "FACTOR S/M/L", "VAR", "FACTOR"
    )?;
    pretty_rule(w)?;
    for row in rows {
        let t = row.profile.thresholds();
        let f = row.profile.factors();
        writeln!(
            w,
            "{:<6} {:>14} {:>16} {:>6} {:>8}",
            row.profile.name(),
            format!("{}/{}/{}", t.short, t.medium, t.long),
            format!("{}/{}/{}", f.short, f.medium, f.long),
            row.profile.variability_factor(),
            row.selected_factor.map_or_else(|| "-".to_string(), |v| v.to_string()),
        )?;
        writeln!(w, "       {}", row.profile.description())?;
    }
    Ok(())
}

fn render_profiles_text(rows: &[ProfileRow], w: &mut dyn Write) -> std::io::Result<()> {
    for row in rows {
        let t = row.profile.thresholds();
        let f = row.profile.factors();
        write!(
            w,
            "{}  dlt={}/{}/{}  factors={}/{}/{}  variability={}",
            row.profile.name(),
            t.short,
            t.medium,
            t.long,
            f.short,
            f.medium,
            f.long,
            row.profile.variability_factor(),
        )?;
        if let Some(factor) = row.selected_factor {
            write!(w, "  selected={factor}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(dlt: Option<f64>) -> Vec<ProfileRow> {
        default_profiles()
            .into_values()
            .map(|profile| ProfileRow {
                selected_factor: dlt.map(|d| profile.select_lead_time_factor(d)),
                profile,
            })
            .collect()
    }

    #[test]
    fn text_lists_every_default_profile() {
        let mut buf = Vec::new();
        render_profiles_text(&rows(None), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert_eq!(out.lines().count(), 5);
        assert!(out.contains("AI  dlt=1/5/21"), "{out}");
        assert!(!out.contains("selected="));
    }

    #[test]
    fn text_shows_selected_factor_for_dlt() {
        let mut buf = Vec::new();
        render_profiles_text(&rows(Some(30.0)), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.lines().all(|line| line.ends_with("selected=0.25")), "{out}");
    }

    #[test]
    fn pretty_has_heading_and_descriptions() {
        let mut buf = Vec::new();
        render_profiles_pretty(&rows(Some(2.0)), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.starts_with("Buffer profiles (5)"), "{out}");
        assert!(out.contains("NAME"));
    }

    #[test]
    fn json_row_flattens_profile() {
        let value = serde_json::to_value(&rows(Some(2.0))[0]).expect("json");
        assert!(value.get("name").is_some(), "{value}");
        assert!(value.get("selected_factor").is_some(), "{value}");
    }
}
