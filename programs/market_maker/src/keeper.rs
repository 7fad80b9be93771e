//! Program keeper
//!
//! Public entry points for every state transition. Each one runs the matching
//! `process_*` handler inside its own unit of work, so a failure anywhere in a call
//! leaves the store and the emitted events exactly as they were.

use crate::bank::BankKeeper;
use crate::context::Ctx;
use crate::instructions::*;
use crate::registry;
use crate::state::{IncentiveDistribution, MarketMakerHandle, Params};
use crate::store::KvStore;
use mm_common::{Address, PairId, Result};

pub struct Keeper<B: BankKeeper> {
    bank: B,
}

impl<B: BankKeeper> Keeper<B> {
    pub fn new(bank: B) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn params(&self, store: &dyn KvStore) -> Result<Params> {
        registry::get_params(store)
    }

    /// Validate and store params
    pub fn set_params(&self, store: &mut dyn KvStore, params: &Params) -> Result<()> {
        params.validate()?;
        registry::set_params(store, params)
    }

    pub fn apply_market_maker(&self, ctx: &mut Ctx<'_>, address: Address, pair_ids: &[PairId]) -> Result<()> {
        ctx.atomic(|ctx| process_apply(self, ctx, address, pair_ids))
    }

    pub fn include_market_makers(&self, ctx: &mut Ctx<'_>, handles: &[MarketMakerHandle]) -> Result<()> {
        ctx.atomic(|ctx| process_include_many(self, ctx, handles))
    }

    pub fn exclude_market_makers(&self, ctx: &mut Ctx<'_>, handles: &[MarketMakerHandle]) -> Result<()> {
        ctx.atomic(|ctx| process_exclude_many(self, ctx, handles))
    }

    pub fn reject_market_makers(&self, ctx: &mut Ctx<'_>, handles: &[MarketMakerHandle]) -> Result<()> {
        ctx.atomic(|ctx| process_reject_many(self, ctx, handles))
    }

    pub fn distribute_incentives(&self, ctx: &mut Ctx<'_>, items: &[IncentiveDistribution]) -> Result<()> {
        ctx.atomic(|ctx| process_distribute_many(self, ctx, items))
    }

    pub fn claim_incentives(&self, ctx: &mut Ctx<'_>, address: Address) -> Result<()> {
        ctx.atomic(|ctx| process_claim(self, ctx, address))
    }
}
