//! Program parameters (changed only through governance)

use mm_common::{Address, Coins, MarketMakerError, PairId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MODULE_NAME: &str = "marketmaker";

/// Basis-point denominator
pub const BPS: u32 = 10_000;

pub const DEFAULT_DEPOSIT_DENOM: &str = "stake";
pub const DEFAULT_DEPOSIT_AMOUNT: u128 = 1_000_000_000;

/// Name the default incentive budget address is derived from
pub const DEFAULT_INCENTIVE_BUDGET_MODULE: &str = "farming";

/// Whitelisted pair and its quoting requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentivePairConfig {
    pub pair_id: PairId,
    /// Unix seconds of the last change to this entry
    #[serde(default)]
    pub update_time: u64,
    /// Share of the budget (basis points)
    pub incentive_weight_bps: u32,
    /// Maximum quoted spread (basis points)
    pub max_spread_bps: u32,
    /// Minimum quoted width (basis points)
    pub min_width_bps: u32,
    /// Minimum resting depth (base units)
    pub min_depth: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Escrow required per applied slot. Changes are not retroactive.
    pub deposit_amount: Coins,
    /// Source account of distributed incentives
    pub incentive_budget_address: Address,
    pub incentive_pairs: Vec<IncentivePairConfig>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            deposit_amount: Coins::from_coin(DEFAULT_DEPOSIT_DENOM, DEFAULT_DEPOSIT_AMOUNT),
            incentive_budget_address: Address::module(DEFAULT_INCENTIVE_BUDGET_MODULE),
            incentive_pairs: Vec::new(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        validate_deposit_amount(&self.deposit_amount)?;
        validate_incentive_budget_address(&self.incentive_budget_address)?;
        validate_incentive_pairs(&self.incentive_pairs)
    }

    pub fn incentive_pair(&self, pair_id: PairId) -> Option<&IncentivePairConfig> {
        self.incentive_pairs.iter().find(|p| p.pair_id == pair_id)
    }

    pub fn is_incentive_pair(&self, pair_id: PairId) -> bool {
        self.incentive_pair(pair_id).is_some()
    }
}

pub fn validate_deposit_amount(amount: &Coins) -> Result<()> {
    amount
        .validate()
        .map_err(|e| MarketMakerError::InvalidParams(format!("deposit amount: {e}")))
}

pub fn validate_incentive_budget_address(address: &Address) -> Result<()> {
    if address.is_zero() {
        return Err(MarketMakerError::InvalidParams(
            "incentive budget address must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_incentive_pairs(pairs: &[IncentivePairConfig]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for pair in pairs {
        if pair.pair_id == 0 {
            return Err(MarketMakerError::InvalidParams(
                "incentive pair id must not be zero".to_string(),
            ));
        }
        if !seen.insert(pair.pair_id) {
            return Err(MarketMakerError::InvalidParams(format!(
                "incentive pair {} is duplicated",
                pair.pair_id
            )));
        }
        if pair.incentive_weight_bps > BPS || pair.max_spread_bps > BPS || pair.min_width_bps > BPS {
            return Err(MarketMakerError::InvalidParams(format!(
                "incentive pair {} has a basis-point field above {}",
                pair.pair_id, BPS
            )));
        }
    }
    Ok(())
}

/// A single-field parameter update carried by a parameter-change proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum ParamChange {
    DepositAmount(Coins),
    IncentiveBudgetAddress(Address),
    IncentivePairs(Vec<IncentivePairConfig>),
}

impl ParamChange {
    /// Field validator for this change
    pub fn validate(&self) -> Result<()> {
        match self {
            ParamChange::DepositAmount(amount) => validate_deposit_amount(amount),
            ParamChange::IncentiveBudgetAddress(address) => validate_incentive_budget_address(address),
            ParamChange::IncentivePairs(pairs) => validate_incentive_pairs(pairs),
        }
    }

    pub fn apply_to(&self, params: &mut Params) {
        match self {
            ParamChange::DepositAmount(amount) => params.deposit_amount = amount.clone(),
            ParamChange::IncentiveBudgetAddress(address) => params.incentive_budget_address = *address,
            ParamChange::IncentivePairs(pairs) => params.incentive_pairs = pairs.clone(),
        }
    }
}
