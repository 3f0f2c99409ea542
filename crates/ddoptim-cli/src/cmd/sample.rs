use clap::Args;
use ddoptim_core::sample::bicycle_network;
use std::io::Write;
use std::path::PathBuf;

use super::{Project, save_network};
use crate::output::{OutputMode, render_network_error, render_success};

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Write the document here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Emit the reference bicycle network as a JSON document.
pub fn run_sample(args: &SampleArgs, output: OutputMode, project: &Project) -> anyhow::Result<()> {
    let network = match bicycle_network() {
        Ok(network) => network,
        Err(err) => {
            render_network_error(output, &err)?;
            return Err(err.into());
        }
    };

    let Some(out) = &args.out else {
        let json = network.to_json_pretty()?;
        let stdout = std::io::stdout();
        let mut w = stdout.lock();
        writeln!(w, "{json}")?;
        return Ok(());
    };

    let path = project.root.join(out);
    save_network(&network, &path)?;
    render_success(
        output,
        &format!(
            "wrote sample network ({} nodes, {} edges) to {}",
            network.len(),
            network.edge_count(),
            path.display()
        ),
    )
}
