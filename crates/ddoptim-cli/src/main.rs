#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use ddoptim_core::config;
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ddoptim: demand-driven supply-chain network model",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Network document to operate on (overrides `[network] path` in ddoptim.toml).
    #[arg(short, long, global = true, value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Emit the sample bicycle network",
        long_about = "Build the reference bicycle-assembly network (26 items, 25 BOM links) \
                      with ADU propagated and print it as a JSON network document.",
        after_help = "EXAMPLES:\n    # Write a starting network to disk\n    ddoptim sample --out network.json\n\n    # Pipe the document elsewhere\n    ddoptim sample | jq '.nodes | length'"
    )]
    Sample(cmd::sample::SampleArgs),

    #[command(
        next_help_heading = "Setup",
        about = "List buffer profiles",
        long_about = "List the buffer profiles of the network, or the built-in F/I/U/AL/AI table \
                      when no network file is configured.",
        after_help = "EXAMPLES:\n    # Built-in profiles\n    ddoptim profiles\n\n    # Factor each profile selects for a 12-day DLT\n    ddoptim profiles --dlt 12"
    )]
    Profiles(cmd::profiles::ProfilesArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Validate the network",
        long_about = "Check that the network is non-empty and acyclic, that every profile \
                      reference resolves and that finished products carry a customer \
                      tolerance time. Exits non-zero when any finding is reported.",
        after_help = "EXAMPLES:\n    ddoptim validate --file network.json\n\n    # Machine-readable report\n    ddoptim validate --json"
    )]
    Validate(cmd::validate::ValidateArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show average daily usage per node",
        long_about = "Tabulate independent and total ADU for every node in topological order.",
        after_help = "EXAMPLES:\n    ddoptim adu\n\n    # Only nodes with demand\n    ddoptim adu --with-demand"
    )]
    Adu(cmd::adu::AduArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Print the topological order",
        after_help = "EXAMPLES:\n    ddoptim order\n\n    # Raw materials first\n    ddoptim order --reverse"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show one node",
        long_about = "Show a node's attributes, buffer decision and direct BOM neighbours.",
        after_help = "EXAMPLES:\n    ddoptim show WHEEL\n\n    ddoptim show SPOKE --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Trace where a component is used",
        long_about = "List every node that consumes the component, directly or indirectly, \
                      and each path from a finished product down to it.",
        after_help = "EXAMPLES:\n    ddoptim where-used STEEL_PLATE"
    )]
    WhereUsed(cmd::where_used::WhereUsedArgs),

    #[command(
        next_help_heading = "Editing",
        about = "Add a BOM relationship",
        long_about = "Declare that PARENT consumes QUANTITY units of CHILD, re-run ADU \
                      propagation and save. Links that would close a cycle are rejected \
                      and the file is left untouched.",
        after_help = "EXAMPLES:\n    # Each wheel takes 36 spokes\n    ddoptim link WHEEL SPOKE 36"
    )]
    Link(cmd::link::LinkArgs),

    #[command(
        next_help_heading = "Editing",
        about = "Record a buffer decision",
        after_help = "EXAMPLES:\n    ddoptim buffer WHEEL --fixed --reason \"bottleneck assembly\"\n\n    ddoptim buffer TIRE --clear"
    )]
    Buffer(cmd::buffer::BufferArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DDOPTIM_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "ddoptim=debug,info"
        } else {
            "ddoptim=info,warn"
        })
    });

    let format = env::var("DDOPTIM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = env::current_dir()?;
    let effective = match config::resolve_config(&root, cli.json) {
        Ok(effective) => effective,
        Err(err) => {
            let output = if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            };
            render_error(output, &CliError::new(format!("{err:#}")))?;
            return Err(err);
        }
    };
    let output = OutputMode::from_resolved(&effective.resolved_output);
    debug!(?output, mode = %effective.project.propagation.mode, "configuration resolved");

    let project = cmd::Project {
        root,
        config: effective.project,
        file: cli.file,
    };

    match cli.command {
        Commands::Sample(ref args) => cmd::sample::run_sample(args, output, &project),
        Commands::Profiles(ref args) => cmd::profiles::run_profiles(args, output, &project),
        Commands::Validate(ref args) => cmd::validate::run_validate(args, output, &project),
        Commands::Adu(ref args) => cmd::adu::run_adu(args, output, &project),
        Commands::Order(ref args) => cmd::order::run_order(args, output, &project),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &project),
        Commands::WhereUsed(ref args) => cmd::where_used::run_where_used(args, output, &project),
        Commands::Link(ref args) => cmd::link::run_link(args, output, &project),
        Commands::Buffer(ref args) => cmd::buffer::run_buffer(args, output, &project),
    }
}
