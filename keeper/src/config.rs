//! Keeper configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Genesis snapshot loaded at startup when no export exists yet (JSON)
    pub snapshot_path: String,

    /// Directory polled for governance proposal files
    pub proposals_dir: String,

    /// Directory polled for signed user message files
    pub messages_dir: String,

    /// Where the snapshot is written after every tick; preferred over
    /// `snapshot_path` on restart
    pub export_path: String,

    /// Polling interval in seconds
    pub poll_interval_secs: u64,

    /// Stop the service when an invariant route reports broken
    pub halt_on_broken_invariant: bool,

    /// Maximum files taken from each inbox per tick
    pub max_files_per_tick: usize,
}

impl Config {
    /// Load configuration from the TOML file named by `KEEPER_CONFIG`
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("KEEPER_CONFIG")
            .unwrap_or_else(|_| "keeper-config.toml".to_string());

        Self::load_or_create(Path::new(&config_path))
    }

    /// Read `path`, writing the default config there first if it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::write_default(path)?;
        }

        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&config_str)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("Failed to parse config TOML")?;
        if config.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be at least 1");
        }
        Ok(config)
    }

    /// Create default configuration
    pub fn default_local() -> Self {
        Self {
            snapshot_path: "~/.mm-keeper/snapshot.json".to_string(),
            proposals_dir: "~/.mm-keeper/proposals".to_string(),
            messages_dir: "~/.mm-keeper/messages".to_string(),
            export_path: "~/.mm-keeper/snapshot.json".to_string(),
            poll_interval_secs: 5,
            halt_on_broken_invariant: true,
            max_files_per_tick: 16,
        }
    }

    /// Write default config to file
    pub fn write_default(path: &Path) -> Result<()> {
        let config = Self::default_local();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path.display()))?;

        log::info!("Created default config at {}", path.display());
        Ok(())
    }
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).context(format!("Failed to expand path {}", path))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
