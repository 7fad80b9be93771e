//! Market-Maker Program Keeper
//!
//! Off-chain service that hosts the program over a snapshot, executes proposal and
//! message files dropped into its inboxes, audits the invariant routes and exports
//! the resulting snapshot.

mod chain;
mod config;
mod inbox;
mod snapshot;

use anyhow::Result;
use chain::Chain;
use config::{expand_path, Config};
use mm_program::{Msg, ProposalContent};
use snapshot::ChainSnapshot;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time;

struct Paths {
    proposals: PathBuf,
    messages: PathBuf,
    export: PathBuf,
}

impl Paths {
    fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            proposals: expand_path(&config.proposals_dir)?,
            messages: expand_path(&config.messages_dir)?,
            export: expand_path(&config.export_path)?,
        })
    }
}

/// Resume from the last export when there is one, else from the genesis snapshot
fn startup_snapshot(config: &Config) -> Result<ChainSnapshot> {
    let export_path = expand_path(&config.export_path)?;
    let path = if export_path.exists() {
        export_path
    } else {
        expand_path(&config.snapshot_path)?
    };

    if path.exists() {
        log::info!("Loading snapshot {}", path.display());
        ChainSnapshot::read(&path)
    } else {
        log::warn!("No snapshot at {}, starting from default genesis", path.display());
        Ok(ChainSnapshot::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Market-Maker Keeper");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({:#}), using default local config", e);
        Config::default_local()
    });

    let snapshot = startup_snapshot(&config)?;
    let mut chain = Chain::from_snapshot(&snapshot)?;
    log::info!("Loaded {} balances", snapshot.bank.balances.len());

    let paths = Paths::from_config(&config)?;
    log::info!("Watching {} and {}", paths.proposals.display(), paths.messages.display());

    // Main event loop
    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        interval.tick().await;

        match tick(&mut chain, &config, &paths) {
            Ok(true) => {}
            Ok(false) => {
                log::error!("Halting: invariant broken");
                return Err(anyhow::anyhow!("invariant broken"));
            }
            Err(e) => log::error!("Error processing tick: {:#}", e),
        }
    }
}

/// One polling round. Returns `false` when the service must halt.
fn tick(chain: &mut Chain, config: &Config, paths: &Paths) -> Result<bool> {
    let proposals = inbox::drain::<ProposalContent, _>(&paths.proposals, config.max_files_per_tick, |p| {
        chain.execute_proposal(p)
    })?;
    let messages = inbox::drain::<Msg, _>(&paths.messages, config.max_files_per_tick, |m| chain.execute_msg(m))?;

    for event in chain.drain_events() {
        log::info!("Event: {}", serde_json::to_string(&event)?);
    }
    if proposals + messages > 0 {
        log::debug!("Executed {} proposals and {} messages", proposals, messages);
    }

    let broken = chain.audit();
    for msg in &broken {
        log::error!("{}", msg);
    }

    chain.snapshot()?.write(&paths.export)?;

    Ok(broken.is_empty() || !config.halt_on_broken_invariant)
}
