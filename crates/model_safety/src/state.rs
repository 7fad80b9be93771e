//! Pure state model of the market-maker program
//!
//! One denomination, users addressed by index. Module accounts are plain fields so
//! conservation can be checked by summing the whole state.

use arrayvec::ArrayVec;

pub const MAX_USERS: usize = 4;
pub const MAX_PAIRS: usize = 4;
pub const MAX_SLOTS: usize = MAX_USERS * MAX_PAIRS;

/// Registration of `user` on `pair`; `deposit` is `Some` exactly while pending
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub user: u8,
    pub pair: u64,
    pub eligible: bool,
    pub deposit: Option<u128>,
}

impl Slot {
    pub fn key(&self) -> (u8, u64) {
        (self.user, self.pair)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub deposit_amount: u128,
    pub pairs: ArrayVec<u64, MAX_PAIRS>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub balances: ArrayVec<u128, MAX_USERS>,
    pub budget: u128,
    pub deposit_reserve: u128,
    pub incentive_reserve: u128,
    /// Sorted by `(user, pair)`
    pub slots: ArrayVec<Slot, MAX_SLOTS>,
    pub claimable: ArrayVec<u128, MAX_USERS>,
    /// Coins in existence; fixed after construction
    pub supply: u128,
    pub params: Params,
}

impl Default for Params {
    fn default() -> Self {
        let mut pairs = ArrayVec::new();
        pairs.push(1);
        pairs.push(2);
        pairs.push(3);
        Self {
            deposit_amount: 1_000_000,
            pairs,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self {
            balances: ArrayVec::new(),
            budget: 0,
            deposit_reserve: 0,
            incentive_reserve: 0,
            slots: ArrayVec::new(),
            claimable: ArrayVec::new(),
            supply: 0,
            params: Params::default(),
        }
    }
}

impl State {
    /// Fresh state with funded users and budget. Users past `MAX_USERS` are dropped;
    /// a supply that would overflow leaves the state empty.
    pub fn new(params: Params, balances: &[u128], budget: u128) -> Self {
        let mut s = State {
            params,
            budget,
            supply: budget,
            ..State::default()
        };
        for &balance in balances.iter().take(MAX_USERS) {
            let Some(supply) = s.supply.checked_add(balance) else {
                return State::default();
            };
            s.supply = supply;
            s.balances.push(balance);
            s.claimable.push(0);
        }
        s
    }

    pub fn slot(&self, user: u8, pair: u64) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.key() == (user, pair))
    }

    pub fn is_pair(&self, pair: u64) -> bool {
        self.params.pairs.contains(&pair)
    }

    pub fn user_count(&self) -> usize {
        self.balances.len()
    }
}
