//! uavswarm CLI - run UAV swarm coverage simulations.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uavswarm::prelude::PolicyKind;

#[derive(Parser)]
#[command(name = "uavswarm")]
#[command(author, version, about = "uavswarm - connected coverage for fixed-wing UAV swarms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default uavswarm.toml
    Init {
        /// Directory to write into (default: current directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Run one simulation
    Run {
        /// Config file (default: uavswarm.toml in this or a parent directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of ticks to run (default: max_ticks from the config)
        #[arg(short, long)]
        ticks: Option<u64>,

        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of UAVs
        #[arg(short, long)]
        agents: Option<u32>,

        /// Decision policy, e.g. connected-coverage or scent-following
        #[arg(short, long)]
        policy: Option<PolicyKind>,

        /// Write periodic coverage stats as JSON lines
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Write the final snapshot as JSON
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Run one simulation per seed and policy and compare the results
    Batch {
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of seeds per policy
        #[arg(long)]
        seeds: Option<u64>,

        /// Comma-separated policies to compare
        #[arg(short, long, value_delimiter = ',')]
        policy: Vec<PolicyKind>,

        #[arg(short, long)]
        ticks: Option<u64>,

        /// Write each run's final stats as JSON lines
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Run {
            config,
            ticks,
            seed,
            agents,
            policy,
            stats,
            snapshot,
        } => commands::run::run(commands::run::RunArgs {
            config,
            ticks,
            seed,
            agents,
            policy,
            stats,
            snapshot,
        }),
        Commands::Batch {
            config,
            seeds,
            policy,
            ticks,
            output,
        } => commands::batch::run(commands::batch::BatchArgs {
            config,
            seeds,
            policies: policy,
            ticks,
            output,
        }),
    }
}
