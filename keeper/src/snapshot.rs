//! Chain snapshot: bank balances plus market-maker genesis, as one JSON document

use anyhow::{Context, Result};
use mm_program::{export_genesis, init_genesis, BankGenesis, GenesisState, Keeper, MemStore, StoreBank};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    #[serde(default)]
    pub bank: BankGenesis,
    #[serde(default)]
    pub market_maker: GenesisState,
}

impl ChainSnapshot {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).context(format!("Failed to read snapshot {}", path.display()))?;
        serde_json::from_slice(&bytes).context("Failed to parse snapshot JSON")
    }

    /// Write through a temporary file in the target directory so readers never see a
    /// partial snapshot
    pub fn write(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(dir).context(format!("Failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, self).context("Failed to serialize snapshot")?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .context(format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Build a store from the snapshot; bank first so the registry checks can see balances
    pub fn load(&self, keeper: &Keeper<StoreBank>) -> Result<MemStore> {
        let mut store = MemStore::new();
        keeper
            .bank()
            .init_genesis(&mut store, &self.bank)
            .context("Invalid bank genesis")?;
        init_genesis(keeper, &mut store, &self.market_maker).context("Invalid market maker genesis")?;
        Ok(store)
    }

    pub fn export(keeper: &Keeper<StoreBank>, store: &MemStore) -> Result<Self> {
        Ok(Self {
            bank: keeper.bank().export_genesis(store)?,
            market_maker: export_genesis(keeper, store)?,
        })
    }
}
