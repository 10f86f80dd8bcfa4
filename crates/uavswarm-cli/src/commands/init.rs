//! Write a default configuration file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let dir = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        println!(
            "  {} {} already exists (use --force to overwrite)",
            "•".yellow(),
            config_path.display()
        );
        return Ok(());
    }

    Config::default().save(&config_path)?;
    println!("  {} Created {}", "✓".green(), config_path.display());
    println!();
    println!("Next steps:");
    println!("  {} edit {} to taste", "1.".blue(), CONFIG_FILE);
    println!("  {} uavswarm run --stats stats.jsonl", "2.".blue());
    println!("  {} uavswarm batch --seeds 5 --policy scent-following,connected-coverage", "3.".blue());
    Ok(())
}
