//! Metagraph CLI - meta-path analysis over heterogeneous graphs.
//!
//! Loads a plain-text graph, then extracts its label schema, enumerates
//! meta-paths, or counts target meta-paths.

mod commands;
mod dump;
mod loader;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use metagraph_engine::Config;
use std::path::PathBuf;

use commands::SearchArgs;

/// Meta-path discovery for heterogeneous information networks.
///
/// Graph files hold one `node <id> <label>[,<label>...]` or
/// `edge <src> <dst> <type>` entry per line.
#[derive(Parser)]
#[command(name = "metagraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Suppress progress and info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Worker threads (defaults to 4x available parallelism)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Sampling seed
    #[arg(long, global = true, default_value_t = metagraph_engine::config::DEFAULT_SEED)]
    seed: u64,

    /// Walk only along edge direction instead of treating the graph as undirected
    #[arg(long, global = true)]
    directed: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format (default for TTY)
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Extract the label schema (and optionally the meta-paths it permits)
    Schema {
        /// Path to the graph file
        path: PathBuf,

        /// Also list schema-level meta-paths of up to this many hops
        #[arg(long)]
        paths: Option<usize>,
    },

    /// Enumerate meta-paths between nodes
    Paths {
        /// Path to the graph file
        path: PathBuf,

        #[command(flatten)]
        search: SearchArgs,

        /// Keep only the first N meta-paths in sorted order
        #[arg(long)]
        limit: Option<usize>,

        /// Render label and edge names instead of ids
        #[arg(long)]
        names: bool,

        /// Write one file of meta-paths per searched pair into this directory
        #[arg(long)]
        dump_dir: Option<PathBuf>,
    },

    /// Count target meta-paths
    Count {
        /// Path to the graph file
        path: PathBuf,

        #[command(flatten)]
        search: SearchArgs,

        /// Target meta-path keys, e.g. `0|0|1|0|0`
        #[arg(long = "target", required = true)]
        targets: Vec<String>,
    },
}

/// Options shared by every command.
pub(crate) struct Global {
    format: OutputFormat,
    quiet: bool,
    config: Config,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = Config::default().with_seed(cli.seed);
    if let Some(threads) = cli.threads {
        config = config.with_threads(threads);
    }
    if cli.directed {
        config = config.with_direction(metagraph_core::graph::Direction::Outgoing);
    }
    let global = Global {
        format: cli.format,
        quiet: cli.quiet,
        config,
    };

    let result = match cli.command {
        Commands::Schema { path, paths } => commands::schema::run(&path, paths, &global),
        Commands::Paths {
            path,
            search,
            limit,
            names,
            dump_dir,
        } => commands::paths::run(&path, &search, limit, names, dump_dir.as_deref(), &global),
        Commands::Count {
            path,
            search,
            targets,
        } => commands::count::run(&path, &search, &targets, &global),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
