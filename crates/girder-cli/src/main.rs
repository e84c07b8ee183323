#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;

use clap::{Parser, Subcommand};
use girder_core::{Metrics, MetricsRecorder};
use output::OutputMode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "girder: dependency-graph analysis for project scheduling",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Print the metrics summary (counters and timings) to stderr.
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Detect cyclic clusters and derive an execution order",
        long_about = "Detect strongly connected components, condense them into a DAG, \
                      and derive component- and vertex-level execution orders.",
        after_help = "EXAMPLES:\n    # Full analysis of a task graph\n    girder analyze tasks.json\n\n    # Emit machine-readable output\n    girder analyze tasks.json --json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Topologically sort the graph as given",
        long_about = "Topologically sort the graph without condensing cycles. A cyclic \
                      graph is reported as having no ordering.",
        after_help = "EXAMPLES:\n    # Linearize an acyclic task graph\n    girder order tasks.json\n\n    # Emit machine-readable output\n    girder order tasks.json --json"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        about = "Compute shortest or longest paths from a source",
        long_about = "Compute single-source shortest (default) or longest paths over an \
                      acyclic task graph.",
        after_help = "EXAMPLES:\n    # Shortest durations from vertex 0\n    girder paths tasks.json --source 0\n\n    # Longest durations (per-vertex critical distances)\n    girder paths tasks.json --source 0 --longest"
    )]
    Paths(cmd::paths::PathsArgs),

    #[command(
        about = "Find the critical path through the task DAG",
        long_about = "Find the maximum-total-duration path. With --source, only paths \
                      from that vertex are considered; otherwise every vertex is tried.",
        after_help = "EXAMPLES:\n    # Global critical path\n    girder critical tasks.json\n\n    # Critical path from a fixed start\n    girder critical tasks.json --source 0"
    )]
    Critical(cmd::critical::CriticalArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("GIRDER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "girder=debug,info"
        } else {
            "girder=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mode = cli.output_mode();
    let mut metrics = MetricsRecorder::new();

    let outcome = match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run(args, mode, &mut metrics),
        Commands::Order(args) => cmd::order::run(args, mode, &mut metrics),
        Commands::Paths(args) => cmd::paths::run(args, mode, &mut metrics),
        Commands::Critical(args) => cmd::critical::run(args, mode, &mut metrics),
    };

    if cli.timing {
        eprint!("{}", metrics.summary());
    }

    outcome
}
