//! Market-maker incentive program
//!
//! Addresses apply to quote a whitelisted pair by escrowing a deposit; governance
//! includes, excludes or rejects them and distributes incentives out of a budget
//! account, which eligible makers later claim.

pub mod bank;
pub mod context;
pub mod events;
pub mod genesis;
pub mod instructions;
pub mod invariants;
pub mod keeper;
pub mod msgs;
pub mod proposal;
pub mod query;
pub mod registry;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

pub use bank::*;
pub use context::*;
pub use events::*;
pub use genesis::*;
pub use invariants::*;
pub use keeper::*;
pub use msgs::*;
pub use proposal::*;
pub use state::*;
pub use store::{CacheStore, KvStore, MemStore};

pub use mm_common::{Address, Coin, Coins, MarketMakerError, PairId, Result};
