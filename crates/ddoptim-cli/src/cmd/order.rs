use clap::Args;
use serde::Serialize;
use std::io::Write;

use super::Project;
use crate::output::{OutputMode, pretty_section, render_mode, render_network_error};

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Children before parents (raw materials first).
    #[arg(long)]
    pub reverse: bool,
}

#[derive(Debug, Serialize)]
struct OrderOutput {
    reverse: bool,
    order: Vec<String>,
}

/// Print the topological order of the network.
pub fn run_order(args: &OrderArgs, output: OutputMode, project: &Project) -> anyhow::Result<()> {
    let (_, network) = project.load(output)?;
    let order = if args.reverse {
        network.reverse_topological_order()
    } else {
        network.topological_order()
    };
    let order = match order {
        Ok(order) => order,
        Err(err) => {
            render_network_error(output, &err)?;
            return Err(err.into());
        }
    };

    let value = OrderOutput {
        reverse: args.reverse,
        order,
    };
    render_mode(
        output,
        &value,
        |v, w| {
            for id in &v.order {
                writeln!(w, "{id}")?;
            }
            Ok(())
        },
        |v, w| render_order_pretty(v, w),
    )
}

fn render_order_pretty(value: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let heading = if value.reverse {
        "Reverse topological order (components first)"
    } else {
        "Topological order (parents first)"
    };
    pretty_section(w, heading)?;
    for (position, id) in value.order.iter().enumerate() {
        writeln!(w, "{:>4}. {id}", position + 1)?;
    }
    Ok(())
}
