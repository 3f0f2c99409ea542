use clap::Args;
use ddoptim_core::{Network, NodeType};
use serde::Serialize;
use std::io::Write;

use super::Project;
use crate::output::{
    OutputMode, fmt_adu, pretty_rule, pretty_section, render_mode, render_network_error,
};

#[derive(Args, Debug)]
pub struct AduArgs {
    /// Only list nodes that carry demand.
    #[arg(long)]
    pub with_demand: bool,
}

#[derive(Debug, Serialize)]
struct AduRow {
    node_id: String,
    node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    independent_adu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adu: Option<f64>,
}

fn adu_rows(network: &Network, order: &[String], with_demand: bool) -> Vec<AduRow> {
    order
        .iter()
        .filter_map(|id| network.node(id))
        .filter(|node| !with_demand || node.adu().is_some())
        .map(|node| AduRow {
            node_id: node.node_id().to_string(),
            node_type: node.node_type(),
            independent_adu: node.independent_adu(),
            adu: node.adu(),
        })
        .collect()
}

/// Tabulate independent and total ADU, parents before children.
pub fn run_adu(args: &AduArgs, output: OutputMode, project: &Project) -> anyhow::Result<()> {
    let (_, network) = project.load(output)?;
    let order = match network.topological_order() {
        Ok(order) => order,
        Err(err) => {
            render_network_error(output, &err)?;
            return Err(err.into());
        }
    };
    let rows = adu_rows(&network, &order, args.with_demand);

    render_mode(
        output,
        &rows,
        |rows, w| render_adu_text(rows, w),
        |rows, w| render_adu_pretty(rows, w),
    )
}

fn render_adu_pretty(rows: &[AduRow], w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Average daily usage ({} nodes)", rows.len()))?;
    writeln!(
        w,
        "{:<18} {:<18} {:>12} {:>12}",
        "NODE", "TYPE", "INDEPENDENT", "ADU"
    )?;
    pretty_rule(w)?;
    for row in rows {
        writeln!(
            w,
            "{:<18} {:<18} {:>12} {:>12}",
            row.node_id,
            row.node_type.as_str(),
            fmt_adu(row.independent_adu),
            fmt_adu(row.adu),
        )?;
    }
    Ok(())
}

fn render_adu_text(rows: &[AduRow], w: &mut dyn Write) -> std::io::Result<()> {
    for row in rows {
        writeln!(
            w,
            "{}  {}  independent={}  adu={}",
            row.node_id,
            row.node_type,
            fmt_adu(row.independent_adu),
            fmt_adu(row.adu)
        )?;
    }
    Ok(())
}
