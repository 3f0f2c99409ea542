use clap::Args;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

use super::{Project, unknown_node};
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct WhereUsedArgs {
    /// Node id.
    pub node: String,
}

#[derive(Debug, Serialize)]
struct WhereUsed {
    node_id: String,
    upstream: BTreeSet<String>,
    /// Each path runs from a finished product down to the node.
    paths: Vec<Vec<String>>,
}

/// Everything that consumes a node, and each route from a finished product.
pub fn run_where_used(
    args: &WhereUsedArgs,
    output: OutputMode,
    project: &Project,
) -> anyhow::Result<()> {
    let (_, network) = project.load(output)?;
    let (Ok(upstream), Ok(paths)) = (
        network.upstream_nodes(&args.node),
        network.paths_to_finished_products(&args.node),
    ) else {
        return unknown_node(output, &args.node);
    };

    let value = WhereUsed {
        node_id: args.node.clone(),
        upstream,
        paths,
    };
    render_mode(
        output,
        &value,
        |v, w| render_where_used_text(v, w),
        |v, w| render_where_used_pretty(v, w),
    )
}

fn render_where_used_pretty(value: &WhereUsed, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("{} is used by {} node(s)", value.node_id, value.upstream.len()),
    )?;
    for id in &value.upstream {
        writeln!(w, "  {id}")?;
    }
    writeln!(w)?;
    pretty_section(w, &format!("Paths from finished products ({})", value.paths.len()))?;
    for path in &value.paths {
        writeln!(w, "  {}", path.join(" → "))?;
    }
    Ok(())
}

fn render_where_used_text(value: &WhereUsed, w: &mut dyn Write) -> std::io::Result<()> {
    for path in &value.paths {
        writeln!(w, "{}", path.join(" > "))?;
    }
    Ok(())
}
