//! Unit-test fixture shared by handler tests

use crate::bank::{BankKeeper, ModuleAccount, StoreBank};
use crate::context::Ctx;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::registry;
use crate::state::{IncentivePairConfig, MarketMakerHandle, Params};
use crate::store::MemStore;
use mm_common::{Address, Coins, PairId};

pub const DEPOSIT: u128 = 1_000_000;

pub fn stake(amount: u128) -> Coins {
    Coins::from_coin("stake", amount)
}

pub fn addr(n: u8) -> Address {
    Address::new([n; 32])
}

pub fn handle(n: u8, pair_id: PairId) -> MarketMakerHandle {
    MarketMakerHandle::new(addr(n), pair_id)
}

pub fn pair_config(pair_id: PairId) -> IncentivePairConfig {
    IncentivePairConfig {
        pair_id,
        update_time: 0,
        incentive_weight_bps: 1_000,
        max_spread_bps: 120,
        min_width_bps: 10,
        min_depth: 100_000_000,
    }
}

pub struct Fixture {
    pub store: MemStore,
    pub events: Vec<Event>,
    pub keeper: Keeper<StoreBank>,
}

impl Fixture {
    /// Pairs 1..=3 whitelisted, deposit of 1_000_000stake, addresses 1..=3 and the
    /// budget funded
    pub fn new() -> Self {
        let mut store = MemStore::new();
        let keeper = Keeper::new(StoreBank);
        let params = Params {
            deposit_amount: stake(DEPOSIT),
            incentive_budget_address: Address::module("farming"),
            incentive_pairs: (1..=3).map(pair_config).collect(),
        };
        keeper.set_params(&mut store, &params).unwrap();
        for n in 1..=3 {
            StoreBank.mint(&mut store, &addr(n), &stake(10_000_000)).unwrap();
        }
        StoreBank
            .mint(&mut store, &params.incentive_budget_address, &stake(100_000_000))
            .unwrap();
        Self {
            store,
            events: Vec::new(),
            keeper,
        }
    }

    /// Keeper plus a context over the fixture's store
    pub fn parts(&mut self) -> (&Keeper<StoreBank>, Ctx<'_>) {
        (&self.keeper, Ctx::new(&mut self.store, &mut self.events))
    }

    pub fn balance(&self, address: &Address) -> u128 {
        StoreBank.balance(&self.store, address).unwrap().amount_of("stake")
    }

    pub fn reserve(&self, module: ModuleAccount) -> u128 {
        StoreBank.module_balance(&self.store, module).unwrap().amount_of("stake")
    }

    pub fn set_deposit_amount(&mut self, amount: u128) {
        let mut params = registry::get_params(&self.store).unwrap();
        params.deposit_amount = stake(amount);
        self.keeper.set_params(&mut self.store, &params).unwrap();
    }

    pub fn apply(&mut self, n: u8, pair_ids: &[PairId]) -> mm_common::Result<()> {
        let (keeper, mut ctx) = self.parts();
        keeper.apply_market_maker(&mut ctx, addr(n), pair_ids)
    }

    pub fn include(&mut self, handles: &[MarketMakerHandle]) -> mm_common::Result<()> {
        let (keeper, mut ctx) = self.parts();
        keeper.include_market_makers(&mut ctx, handles)
    }
}
