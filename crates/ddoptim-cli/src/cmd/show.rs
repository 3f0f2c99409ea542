use clap::Args;
use ddoptim_core::NetworkNode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use super::{Project, unknown_node};
use crate::output::{OutputMode, fmt_adu, pretty_kv, pretty_rule, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Node id.
    pub node: String,
}

#[derive(Debug, Serialize)]
struct ShowNode {
    #[serde(flatten)]
    node: NetworkNode,
    /// Parent id → quantity of this node per parent.
    parents: BTreeMap<String, f64>,
    /// Child id → quantity per unit of this node.
    children: BTreeMap<String, f64>,
}

/// Show one node with its direct BOM neighbours.
pub fn run_show(args: &ShowArgs, output: OutputMode, project: &Project) -> anyhow::Result<()> {
    let (_, network) = project.load(output)?;
    let (Some(node), Ok(parents), Ok(children)) = (
        network.node(&args.node),
        network.parents(&args.node),
        network.children(&args.node),
    ) else {
        return unknown_node(output, &args.node);
    };

    let show = ShowNode {
        node: node.clone(),
        parents: parents.clone(),
        children: children.clone(),
    };
    render_mode(
        output,
        &show,
        |s, w| render_show_text(s, w),
        |s, w| render_show_pretty(s, w),
    )
}

fn edges_line(edges: &BTreeMap<String, f64>) -> String {
    edges
        .iter()
        .map(|(id, qty)| format!("{id} x{qty}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_show_pretty(show: &ShowNode, w: &mut dyn Write) -> std::io::Result<()> {
    let node = &show.node;
    pretty_section(w, &format!("Node {}", node.node_id()))?;
    writeln!(w, "{}", node.name())?;
    pretty_rule(w)?;
    pretty_kv(w, "type", node.node_type().as_str())?;
    pretty_kv(w, "profile", node.buffer_profile_name())?;
    pretty_kv(w, "lead_time", format!("{} days", node.lead_time()))?;
    if let Some(tolerance) = node.customer_tolerance_time() {
        pretty_kv(w, "tolerance", format!("{tolerance} days"))?;
    }
    pretty_kv(w, "moq", node.moq().to_string())?;
    pretty_kv(w, "cycle", format!("{} days", node.order_cycle()))?;
    pretty_kv(w, "unit_cost", node.unit_cost().to_string())?;
    pretty_kv(w, "independent", fmt_adu(node.independent_adu()))?;
    pretty_kv(w, "adu", fmt_adu(node.adu()))?;
    pretty_kv(w, "buffer", node.buffer_status().as_str())?;
    if !node.buffer_rationale().is_empty() {
        pretty_kv(w, "rationale", node.buffer_rationale())?;
    }
    if !show.parents.is_empty() {
        pretty_kv(w, "used_by", edges_line(&show.parents))?;
    }
    if !show.children.is_empty() {
        pretty_kv(w, "consumes", edges_line(&show.children))?;
    }
    Ok(())
}

fn render_show_text(show: &ShowNode, w: &mut dyn Write) -> std::io::Result<()> {
    let node = &show.node;
    writeln!(w, "{}  {}", node.node_id(), node.name())?;
    writeln!(w, "type:        {}", node.node_type())?;
    writeln!(w, "profile:     {}", node.buffer_profile_name())?;
    writeln!(w, "lead_time:   {}", node.lead_time())?;
    if let Some(tolerance) = node.customer_tolerance_time() {
        writeln!(w, "tolerance:   {tolerance}")?;
    }
    writeln!(w, "adu:         {}", fmt_adu(node.adu()))?;
    writeln!(w, "buffer:      {}", node.buffer_status())?;
    if !show.parents.is_empty() {
        writeln!(w, "used_by:     {}", edges_line(&show.parents))?;
    }
    if !show.children.is_empty() {
        writeln!(w, "consumes:    {}", edges_line(&show.children))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddoptim_core::sample::bicycle_network;

    fn show(id: &str) -> ShowNode {
        let net = bicycle_network().expect("sample");
        ShowNode {
            node: net.node(id).expect("node").clone(),
            parents: net.parents(id).expect("parents").clone(),
            children: net.children(id).expect("children").clone(),
        }
    }

    #[test]
    fn text_lists_neighbours() {
        let mut buf = Vec::new();
        render_show_text(&show("WHEEL"), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("adu:         80\n"), "{out}");
        assert!(out.contains("used_by:     BIKE x2\n"), "{out}");
        assert!(out.contains("SPOKE x72"), "{out}");
    }

    #[test]
    fn pretty_shows_tolerance_for_finished_product() {
        let mut buf = Vec::new();
        render_show_pretty(&show("BIKE"), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.starts_with("Node BIKE\n"), "{out}");
        assert!(out.contains("tolerance:   5 days"), "{out}");
        assert!(!out.contains("used_by:"), "{out}");
    }

    #[test]
    fn json_flattens_node_fields() {
        let value = serde_json::to_value(show("SPOKE")).expect("json");
        assert_eq!(value["node_id"], "SPOKE");
        assert_eq!(value["parents"]["WHEEL"], 72.0);
    }
}
