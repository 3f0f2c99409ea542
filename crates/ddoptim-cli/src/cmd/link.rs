use clap::Args;
use ddoptim_core::{NetworkNode, PropagationMode};
use tracing::info;

use super::{Project, save_network};
use crate::output::{OutputMode, fmt_adu, render_network_error, render_success};

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Consuming node.
    pub parent: String,
    /// Consumed node.
    pub child: String,
    /// Units of CHILD per unit of PARENT.
    pub quantity: f64,
}

/// Add (or re-quantify) a BOM edge and save the network.
pub fn run_link(args: &LinkArgs, output: OutputMode, project: &Project) -> anyhow::Result<()> {
    let (path, mut network) = project.load(output)?;
    let mode = project.config.propagation.mode;
    network.set_propagation_mode(mode);

    if let Err(err) = network.add_bom_relationship(&args.parent, &args.child, args.quantity) {
        render_network_error(output, &err)?;
        return Err(err.into());
    }
    if mode == PropagationMode::Deferred && network.is_stale() {
        network.propagate_adu()?;
    }

    save_network(&network, &path)?;
    let child_adu = network.node(&args.child).and_then(NetworkNode::adu);
    info!(parent = %args.parent, child = %args.child, quantity = args.quantity, %mode, "bom edge saved");
    render_success(
        output,
        &format!(
            "linked {} -> {} (qty {}); {} adu is now {}",
            args.parent,
            args.child,
            args.quantity,
            args.child,
            fmt_adu(child_adu)
        ),
    )
}
