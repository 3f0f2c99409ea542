use clap::{ArgGroup, Args};
use ddoptim_core::BufferStatus;

use super::{Project, save_network, unknown_node};
use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(group(ArgGroup::new("status").required(true).multiple(false)))]
pub struct BufferArgs {
    /// Node id.
    pub node: String,

    /// Planner insists on a buffer here.
    #[arg(long, group = "status")]
    pub fixed: bool,

    /// Planner rules out a buffer here.
    #[arg(long, group = "status")]
    pub forbidden: bool,

    /// Record an algorithmic recommendation.
    #[arg(long, group = "status")]
    pub recommended: bool,

    /// Drop an algorithmic recommendation. Planner decisions are kept.
    #[arg(long, group = "status")]
    pub clear: bool,

    /// Rationale stored with the decision.
    #[arg(long, default_value = "")]
    pub reason: String,
}

/// Apply a buffer-status transition and save the network.
pub fn run_buffer(args: &BufferArgs, output: OutputMode, project: &Project) -> anyhow::Result<()> {
    let (path, mut network) = project.load(output)?;
    let Some(mut node) = network.node_mut(&args.node) else {
        return unknown_node(output, &args.node);
    };

    if args.fixed {
        node.set_user_fixed_buffer(args.reason.as_str());
    } else if args.forbidden {
        node.set_user_forbidden_buffer(args.reason.as_str());
    } else if args.recommended {
        node.set_algorithm_recommended_buffer(args.reason.as_str());
    } else {
        node.clear_buffer();
    }
    let status: BufferStatus = node.buffer_status();

    save_network(&network, &path)?;
    render_success(output, &format!("{} buffer status: {status}", args.node))
}
