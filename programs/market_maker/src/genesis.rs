//! Genesis import and export of the registry

use crate::bank::BankKeeper;
use crate::invariants::{
    deposit_eligibility_invariant, deposit_records_invariant, incentive_reserve_invariant, Invariant,
};
use crate::keeper::Keeper;
use crate::registry;
use crate::state::{DepositRecord, IncentiveRecord, MarketMakerEntry, MarketMakerHandle, Params};
use crate::store::{CacheStore, KvStore};
use mm_common::{MarketMakerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    #[serde(default)]
    pub market_makers: Vec<MarketMakerEntry>,
    #[serde(default)]
    pub deposits: Vec<DepositRecord>,
    #[serde(default)]
    pub incentives: Vec<IncentiveRecord>,
}

impl GenesisState {
    /// Stateless checks: well-formed records, no duplicate keys, and a deposit for
    /// exactly the pending entries
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;

        let mut slots = BTreeSet::new();
        for entry in &self.market_makers {
            let handle = entry.handle();
            handle.validate()?;
            if !slots.insert(handle) {
                return Err(MarketMakerError::InvalidGenesis(format!(
                    "duplicate market maker {} for pair {}",
                    entry.address, entry.pair_id
                )));
            }
        }

        let mut deposited = BTreeSet::new();
        for deposit in &self.deposits {
            let handle = MarketMakerHandle::new(deposit.address, deposit.pair_id);
            handle.validate()?;
            deposit.amount.validate()?;
            if !deposited.insert(handle) {
                return Err(MarketMakerError::InvalidGenesis(format!(
                    "duplicate deposit for {} on pair {}",
                    deposit.address, deposit.pair_id
                )));
            }
        }

        let pending: BTreeSet<MarketMakerHandle> = self
            .market_makers
            .iter()
            .filter(|e| !e.eligible)
            .map(|e| e.handle())
            .collect();
        if let Some(h) = pending.symmetric_difference(&deposited).next() {
            return Err(MarketMakerError::InvalidGenesis(format!(
                "market maker {} for pair {} must be pending exactly when it has a deposit",
                h.address, h.pair_id
            )));
        }

        let mut addresses = BTreeSet::new();
        for incentive in &self.incentives {
            incentive.address.validate()?;
            if incentive.claimable.is_empty() {
                return Err(MarketMakerError::InvalidGenesis(format!(
                    "empty claimable incentive for {}",
                    incentive.address
                )));
            }
            incentive.claimable.validate()?;
            if !addresses.insert(incentive.address) {
                return Err(MarketMakerError::InvalidGenesis(format!(
                    "duplicate incentive for {}",
                    incentive.address
                )));
            }
        }
        Ok(())
    }
}

/// Load `genesis` into the store.
///
/// Bank balances must already be in place: the registry checks run against them and
/// any broken one aborts the import with nothing written.
pub fn init_genesis<B: BankKeeper>(keeper: &Keeper<B>, store: &mut dyn KvStore, genesis: &GenesisState) -> Result<()> {
    genesis.validate()?;

    let mut cache = CacheStore::new(store);
    registry::set_params(&mut cache, &genesis.params)?;
    for entry in &genesis.market_makers {
        registry::set_market_maker(&mut cache, entry)?;
    }
    for deposit in &genesis.deposits {
        registry::set_deposit(&mut cache, deposit)?;
    }
    for incentive in &genesis.incentives {
        registry::set_incentive(&mut cache, incentive)?;
    }

    let checks: [Invariant<B>; 3] = [
        deposit_records_invariant,
        incentive_reserve_invariant,
        deposit_eligibility_invariant,
    ];
    for check in checks {
        let (msg, broken) = check(keeper, &cache);
        if broken {
            return Err(MarketMakerError::InvariantBroken(msg));
        }
    }

    cache.write();
    log::info!(
        "genesis loaded: {} market makers, {} deposits, {} incentives",
        genesis.market_makers.len(),
        genesis.deposits.len(),
        genesis.incentives.len()
    );
    Ok(())
}

pub fn export_genesis<B: BankKeeper>(keeper: &Keeper<B>, store: &dyn KvStore) -> Result<GenesisState> {
    Ok(GenesisState {
        params: keeper.params(store)?,
        market_makers: registry::market_makers(store)?,
        deposits: registry::deposits(store)?,
        incentives: registry::incentives(store)?,
    })
}
