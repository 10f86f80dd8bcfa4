//! Run one simulation.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uavswarm::prelude::*;

use crate::config::Config;

pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub ticks: Option<u64>,
    pub seed: Option<u64>,
    pub agents: Option<u32>,
    pub policy: Option<PolicyKind>,
    pub stats: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
}

impl RunArgs {
    /// Command-line flags win over the file.
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(agents) = self.agents {
            config.agent_count = agents;
        }
        if let Some(policy) = self.policy {
            config.policy.kind = policy;
        }
        if let Some(ticks) = self.ticks {
            config.max_ticks = ticks;
        }
    }
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?.simulation;
    args.apply(&mut config);
    let ticks = config.max_ticks;

    println!(
        "{} {} UAVs, policy {}, seed {}",
        "→".blue(),
        config.agent_count.to_string().cyan(),
        config.policy.kind.to_string().cyan(),
        config.seed.to_string().cyan()
    );
    let mut sim = Simulation::configure(config).context("Invalid simulation config")?;

    let mut stats_out = match &args.stats {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => None,
    };

    let pb = ProgressBar::new(ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    for _ in 0..ticks {
        sim.tick();
        if sim.sample_due() {
            if let Some(out) = stats_out.as_mut() {
                serde_json::to_writer(&mut *out, &sim.stats())?;
                writeln!(out)?;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(mut out) = stats_out {
        out.flush()?;
    }

    if let Some(path) = &args.snapshot {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &sim.snapshot())
            .context("Failed to write snapshot")?;
    }

    println!("{} Simulation complete after {} ticks", "✓".green().bold(), sim.current_tick());
    println!("{}", "═".repeat(40).dimmed());
    super::print_stats(&sim.stats());
    println!("{}", "═".repeat(40).dimmed());

    if let Some(path) = &args.stats {
        println!("  Stats written to {}", path.display());
    }
    if let Some(path) = &args.snapshot {
        println!("  Snapshot written to {}", path.display());
    }
    Ok(())
}
