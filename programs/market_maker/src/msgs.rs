//! Signed user messages and their dispatch

use crate::bank::BankKeeper;
use crate::context::Ctx;
use crate::keeper::Keeper;
use mm_common::{Address, MarketMakerError, PairId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Apply as a market maker for one or more pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgApplyMarketMaker {
    pub address: Address,
    pub pair_ids: Vec<PairId>,
}

impl MsgApplyMarketMaker {
    pub fn new(address: Address, pair_ids: Vec<PairId>) -> Self {
        Self { address, pair_ids }
    }

    pub fn validate_basic(&self) -> Result<()> {
        self.address.validate()?;
        if self.pair_ids.is_empty() {
            return Err(MarketMakerError::EmptyPairIds);
        }
        let mut seen = BTreeSet::new();
        for &pair_id in &self.pair_ids {
            if pair_id == 0 {
                return Err(MarketMakerError::InvalidPairId);
            }
            if !seen.insert(pair_id) {
                return Err(MarketMakerError::DuplicatePairId(pair_id));
            }
        }
        Ok(())
    }

    pub fn signer(&self) -> Address {
        self.address
    }
}

/// Claim every accrued incentive of the signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgClaimIncentives {
    pub address: Address,
}

impl MsgClaimIncentives {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn validate_basic(&self) -> Result<()> {
        self.address.validate()
    }

    pub fn signer(&self) -> Address {
        self.address
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    ApplyMarketMaker(MsgApplyMarketMaker),
    ClaimIncentives(MsgClaimIncentives),
}

/// Validate and route a message to its keeper operation
pub fn handle_msg<B: BankKeeper>(keeper: &Keeper<B>, ctx: &mut Ctx<'_>, msg: &Msg) -> Result<()> {
    match msg {
        Msg::ApplyMarketMaker(m) => {
            log::debug!("Instruction: ApplyMarketMaker");
            m.validate_basic()?;
            keeper.apply_market_maker(ctx, m.address, &m.pair_ids)
        }
        Msg::ClaimIncentives(m) => {
            log::debug!("Instruction: ClaimIncentives");
            m.validate_basic()?;
            keeper.claim_incentives(ctx, m.address)
        }
    }
}
