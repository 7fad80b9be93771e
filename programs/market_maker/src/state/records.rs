//! Registry records

use mm_common::{Address, Coins, MarketMakerError, PairId, Result};
use serde::{Deserialize, Serialize};

/// Registration of `address` on `pair_id`.
/// `eligible == false` means applied and awaiting governance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketMakerEntry {
    pub address: Address,
    pub pair_id: PairId,
    pub eligible: bool,
}

impl MarketMakerEntry {
    pub fn handle(&self) -> MarketMakerHandle {
        MarketMakerHandle::new(self.address, self.pair_id)
    }
}

/// Escrowed stake of a pending entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub address: Address,
    pub pair_id: PairId,
    pub amount: Coins,
}

/// Accrued incentive of an address across all of its eligible pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveRecord {
    pub address: Address,
    pub claimable: Coins,
}

/// Program slot reference used by governance batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarketMakerHandle {
    pub address: Address,
    pub pair_id: PairId,
}

impl MarketMakerHandle {
    pub fn new(address: Address, pair_id: PairId) -> Self {
        Self { address, pair_id }
    }

    pub fn validate(&self) -> Result<()> {
        self.address.validate()?;
        if self.pair_id == 0 {
            return Err(MarketMakerError::InvalidPairId);
        }
        Ok(())
    }
}

/// One line of an incentive distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveDistribution {
    pub address: Address,
    pub pair_id: PairId,
    pub amount: Coins,
}

impl IncentiveDistribution {
    pub fn handle(&self) -> MarketMakerHandle {
        MarketMakerHandle::new(self.address, self.pair_id)
    }

    pub fn validate(&self) -> Result<()> {
        self.handle().validate()?;
        if self.amount.is_empty() {
            return Err(MarketMakerError::EmptyIncentive);
        }
        self.amount.validate()
    }
}
