//! Compare policies over several seeds.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uavswarm::prelude::*;

use crate::config::Config;

pub struct BatchArgs {
    pub config: Option<PathBuf>,
    pub seeds: Option<u64>,
    pub policies: Vec<PolicyKind>,
    pub ticks: Option<u64>,
    pub output: Option<PathBuf>,
}

/// Final stats of one run.
#[derive(Debug, Serialize)]
struct BatchRecord {
    policy: PolicyKind,
    seed: u64,
    stats: CoverageStats,
}

/// Per-policy means over all seeds.
#[derive(Debug, Default, PartialEq)]
struct Summary {
    runs: usize,
    never_scanned_pct: f64,
    stale_cells_pct: f64,
    connected_to_base_pct: f64,
    components: f64,
    fallbacks: f64,
}

impl Summary {
    fn of(records: &[&BatchRecord]) -> Self {
        let n = records.len();
        if n == 0 {
            return Self::default();
        }
        Self {
            runs: n,
            never_scanned_pct: mean(records, |s| s.area.never_scanned_pct),
            stale_cells_pct: mean(records, |s| s.area.stale_cells_pct),
            connected_to_base_pct: mean(records, |s| s.graph.connected_to_base_pct),
            components: mean(records, |s| s.graph.connected_components as f64),
            fallbacks: mean(records, |s| s.fallbacks as f64),
        }
    }
}

fn mean(records: &[&BatchRecord], f: impl Fn(&CoverageStats) -> f64) -> f64 {
    records.iter().map(|r| f(&r.stats)).sum::<f64>() / records.len() as f64
}

/// Runs of `policies` × `seeds`, seeds counting up from the configured one.
fn plan(base: &SimulationConfig, policies: &[PolicyKind], seeds: u64) -> Vec<SimulationConfig> {
    let mut runs = Vec::new();
    for policy in policies {
        for i in 0..seeds {
            let mut config = base.clone();
            config.policy.kind = *policy;
            config.seed = base.seed.wrapping_add(i);
            runs.push(config);
        }
    }
    runs
}

pub fn run(args: BatchArgs) -> Result<()> {
    let file = Config::load(args.config.as_deref())?;
    let mut base = file.simulation;
    if let Some(ticks) = args.ticks {
        base.max_ticks = ticks;
    }
    let seeds = args.seeds.unwrap_or(file.batch.seeds);
    let policies = if !args.policies.is_empty() {
        args.policies
    } else if !file.batch.policies.is_empty() {
        file.batch.policies
    } else {
        vec![base.policy.kind]
    };

    let runs = plan(&base, &policies, seeds);
    println!(
        "{} {} runs: {} policies × {} seeds, {} ticks each",
        "→".blue(),
        runs.len().to_string().cyan(),
        policies.len(),
        seeds,
        base.max_ticks
    );

    let pb = ProgressBar::new(runs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} runs {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let mut records = Vec::with_capacity(runs.len());
    for config in runs {
        pb.set_message(format!("{} seed {}", config.policy.kind, config.seed));
        let (policy, seed, ticks) = (config.policy.kind, config.seed, config.max_ticks);
        let mut sim = Simulation::configure(config)
            .with_context(|| format!("Invalid config for {policy} seed {seed}"))?;
        let report = sim.run(ticks);
        records.push(BatchRecord {
            policy,
            seed,
            stats: report.last,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(path) = &args.output {
        let mut out = BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        );
        for record in &records {
            serde_json::to_writer(&mut out, record)?;
            writeln!(out)?;
        }
        out.flush()?;
        println!("  Results written to {}", path.display());
    }

    println!();
    println!(
        "{:<20} {:>5} {:>10} {:>8} {:>10} {:>8} {:>10}",
        "policy".bold(),
        "runs".bold(),
        "unscanned".bold(),
        "stale".bold(),
        "connected".bold(),
        "comps".bold(),
        "fallbacks".bold()
    );
    println!("{}", "─".repeat(77).dimmed());
    for policy in &policies {
        let of_policy: Vec<&BatchRecord> = records.iter().filter(|r| r.policy == *policy).collect();
        let s = Summary::of(&of_policy);
        println!(
            "{:<20} {:>5} {:>9.2}% {:>7.2}% {:>9.2}% {:>8.2} {:>10.1}",
            policy.as_str().cyan(),
            s.runs,
            s.never_scanned_pct,
            s.stale_cells_pct,
            s.connected_to_base_pct,
            s.components,
            s.fallbacks
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_crosses_policies_and_seeds() {
        let base = SimulationConfig {
            seed: 40,
            ..SimulationConfig::default()
        };
        let runs = plan(&base, &[PolicyKind::RandomHeading, PolicyKind::Repulsion], 3);
        assert_eq!(runs.len(), 6);
        let seeds: Vec<u64> = runs.iter().map(|c| c.seed).collect();
        assert_eq!(seeds, vec![40, 41, 42, 40, 41, 42]);
        assert_eq!(runs[0].policy.kind, PolicyKind::RandomHeading);
        assert_eq!(runs[5].policy.kind, PolicyKind::Repulsion);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn small_batch_writes_one_record_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("uavswarm.toml");
        std::fs::write(&config, "[simulation]\nagent_count = 2\nwarmup_ticks = 0\n").unwrap();
        let output = dir.path().join("batch.jsonl");

        run(BatchArgs {
            config: Some(config),
            seeds: Some(2),
            policies: vec![PolicyKind::ScentFollowing, PolicyKind::ConnectedCoverage],
            ticks: Some(30),
            output: Some(output.clone()),
        })
        .unwrap();

        let records: Vec<serde_json::Value> = std::fs::read_to_string(&output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["policy"], "scent-following");
        assert_eq!(records[3]["policy"], "connected-coverage");
        assert_eq!(records[3]["stats"]["tick"], 30);
    }
}
