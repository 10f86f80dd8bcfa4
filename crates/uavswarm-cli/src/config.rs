//! Configuration file handling for the uavswarm CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uavswarm::prelude::*;

pub const CONFIG_FILE: &str = "uavswarm.toml";

/// Contents of `uavswarm.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_seeds")]
    pub seeds: u64,
    /// Policies compared by `batch`; empty means the simulation's own policy.
    #[serde(default)]
    pub policies: Vec<PolicyKind>,
}

fn default_seeds() -> u64 { 10 }

impl Default for Config {
    fn default() -> Self {
        Self {
            batch: BatchConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            seeds: default_seeds(),
            policies: Vec::new(),
        }
    }
}

impl Config {
    /// Load `path`, or else `uavswarm.toml` from the current or a parent
    /// directory, or else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let found = match path {
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };
        match found {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::read(&path)
            }
            None => Ok(Config::default()),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find `uavswarm.toml` in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
