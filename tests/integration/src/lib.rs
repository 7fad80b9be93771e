//! Market-Maker Integration Tests
//!
//! Shared harness for the scenario and model-equivalence tests. [`TestChain`] hosts
//! the program over an in-memory store with a funded budget and a fixed set of
//! users, and can project its state onto the pure `model_safety` model.

use mm_program::{
    all_invariants, handle_proposal, query, registry, Address, BankKeeper, Coins, Ctx, Event,
    IncentiveDistribution, IncentivePairConfig, Keeper, MarketMakerError, MarketMakerHandle, MemStore,
    ModuleAccount, PairId, Params, ProposalContent, Result, StoreBank,
};

pub const DENOM: &str = "stake";
pub const BUDGET_MODULE: &str = "farming";

pub fn coins(amount: u128) -> Coins {
    Coins::from_coin(DENOM, amount)
}

/// Test user `n`; users are numbered from 0 so they line up with model indices
pub fn user(n: u8) -> Address {
    Address::new([n.wrapping_add(1); 32])
}

pub fn pair_config(pair_id: PairId) -> IncentivePairConfig {
    IncentivePairConfig {
        pair_id,
        update_time: 0,
        incentive_weight_bps: 2_500,
        max_spread_bps: 120,
        min_width_bps: 10,
        min_depth: 1_000_000,
    }
}

pub struct TestChain {
    pub store: MemStore,
    pub events: Vec<Event>,
    pub keeper: Keeper<StoreBank>,
    pub users: Vec<u128>,
    pub budget: u128,
}

impl TestChain {
    /// Whitelist `pairs`, set the deposit and fund each user and the budget
    pub fn new(deposit: u128, pairs: &[PairId], users: &[u128], budget: u128) -> Result<Self> {
        let mut store = MemStore::new();
        let keeper = Keeper::new(StoreBank);
        let params = Params {
            deposit_amount: coins(deposit),
            incentive_budget_address: Address::module(BUDGET_MODULE),
            incentive_pairs: pairs.iter().copied().map(pair_config).collect(),
        };
        keeper.set_params(&mut store, &params)?;
        for (n, &balance) in users.iter().enumerate() {
            let n = u8::try_from(n).map_err(|_| MarketMakerError::Overflow)?;
            StoreBank.mint(&mut store, &user(n), &coins(balance))?;
        }
        StoreBank.mint(&mut store, &params.incentive_budget_address, &coins(budget))?;
        Ok(Self {
            store,
            events: Vec::new(),
            keeper,
            users: users.to_vec(),
            budget,
        })
    }

    pub fn ctx(&mut self) -> (&Keeper<StoreBank>, Ctx<'_>) {
        (&self.keeper, Ctx::new(&mut self.store, &mut self.events))
    }

    pub fn apply(&mut self, n: u8, pair_ids: &[PairId]) -> Result<()> {
        let (keeper, mut ctx) = self.ctx();
        keeper.apply_market_maker(&mut ctx, user(n), pair_ids)
    }

    pub fn include(&mut self, handles: &[(u8, PairId)]) -> Result<()> {
        let handles = to_handles(handles);
        let (keeper, mut ctx) = self.ctx();
        keeper.include_market_makers(&mut ctx, &handles)
    }

    pub fn exclude(&mut self, handles: &[(u8, PairId)]) -> Result<()> {
        let handles = to_handles(handles);
        let (keeper, mut ctx) = self.ctx();
        keeper.exclude_market_makers(&mut ctx, &handles)
    }

    pub fn reject(&mut self, handles: &[(u8, PairId)]) -> Result<()> {
        let handles = to_handles(handles);
        let (keeper, mut ctx) = self.ctx();
        keeper.reject_market_makers(&mut ctx, &handles)
    }

    pub fn distribute(&mut self, items: &[(u8, PairId, u128)]) -> Result<()> {
        let items: Vec<IncentiveDistribution> = items
            .iter()
            .map(|&(n, pair_id, amount)| IncentiveDistribution {
                address: user(n),
                pair_id,
                amount: coins(amount),
            })
            .collect();
        let (keeper, mut ctx) = self.ctx();
        keeper.distribute_incentives(&mut ctx, &items)
    }

    pub fn claim(&mut self, n: u8) -> Result<()> {
        let (keeper, mut ctx) = self.ctx();
        keeper.claim_incentives(&mut ctx, user(n))
    }

    pub fn propose(&mut self, content: &ProposalContent) -> Result<()> {
        let (keeper, mut ctx) = self.ctx();
        handle_proposal(keeper, &mut ctx, content)
    }

    pub fn set_deposit_amount(&mut self, amount: u128) -> Result<()> {
        let mut params = self.keeper.params(&self.store)?;
        params.deposit_amount = coins(amount);
        self.keeper.set_params(&mut self.store, &params)
    }

    pub fn balance(&self, address: &Address) -> Result<u128> {
        Ok(StoreBank.balance(&self.store, address)?.amount_of(DENOM))
    }

    pub fn user_balance(&self, n: u8) -> Result<u128> {
        self.balance(&user(n))
    }

    pub fn reserve(&self, module: ModuleAccount) -> Result<u128> {
        self.balance(&module.address())
    }

    pub fn budget_balance(&self) -> Result<u128> {
        self.balance(&Address::module(BUDGET_MODULE))
    }

    /// Sum of every recorded deposit
    pub fn deposit_total(&self) -> Result<u128> {
        let deposits = registry::deposits(&self.store)?;
        let total = Coins::sum(deposits.iter().map(|d| &d.amount))?;
        Ok(total.amount_of(DENOM))
    }

    pub fn claimable(&self, n: u8) -> Result<u128> {
        Ok(query::incentive(&self.store, &user(n))?.claimable.amount_of(DENOM))
    }

    /// Panics with the checker's message when any invariant is broken
    pub fn assert_invariants(&self) {
        let (msg, broken) = all_invariants(&self.keeper, &self.store);
        assert!(!broken, "{msg}");
    }

    /// Model state with the same parameters and starting balances
    pub fn initial_model(&self) -> Result<model_safety::State> {
        let params = self.keeper.params(&self.store)?;
        let mut model_params = model_safety::Params::default();
        model_params.deposit_amount = params.deposit_amount.amount_of(DENOM);
        model_params.pairs.clear();
        for config in params.incentive_pairs.iter().take(model_safety::MAX_PAIRS) {
            model_params.pairs.push(config.pair_id);
        }
        Ok(model_safety::State::new(model_params, &self.users, self.budget))
    }

    /// Project the program's store onto the model
    pub fn to_model(&self, initial: &model_safety::State) -> Result<model_safety::State> {
        let mut s = initial.clone();
        for n in 0..s.user_count() {
            let n8 = u8::try_from(n).map_err(|_| MarketMakerError::Overflow)?;
            s.balances[n] = self.user_balance(n8)?;
            s.claimable[n] = self.claimable(n8)?;
        }
        s.budget = self.budget_balance()?;
        s.deposit_reserve = self.reserve(ModuleAccount::DepositReserve)?;
        s.incentive_reserve = self.reserve(ModuleAccount::ClaimableIncentiveReserve)?;
        s.params.deposit_amount = self.keeper.params(&self.store)?.deposit_amount.amount_of(DENOM);

        s.slots.clear();
        for entry in registry::market_makers(&self.store)? {
            let Some(n) = (0..initial.user_count()).find(|&n| user(n as u8) == entry.address) else {
                continue;
            };
            let deposit = registry::get_deposit(&self.store, &entry.address, entry.pair_id)?
                .map(|d| d.amount.amount_of(DENOM));
            let slot = model_safety::Slot {
                user: n as u8,
                pair: entry.pair_id,
                eligible: entry.eligible,
                deposit,
            };
            if s.slots.try_push(slot).is_err() {
                return Err(MarketMakerError::Overflow);
            }
        }
        Ok(s)
    }
}

fn to_handles(handles: &[(u8, PairId)]) -> Vec<MarketMakerHandle> {
    handles
        .iter()
        .map(|&(n, pair_id)| MarketMakerHandle::new(user(n), pair_id))
        .collect()
}
