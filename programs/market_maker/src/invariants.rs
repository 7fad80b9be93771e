//! Invariant checker
//!
//! Read-only checks comparing registry aggregates with escrow balances. Each check
//! returns a diagnostic message and whether the invariant is broken; nothing is
//! repaired here. The host decides whether a broken invariant halts the chain.

use crate::bank::{BankKeeper, ModuleAccount};
use crate::keeper::Keeper;
use crate::registry;
use crate::state::{MarketMakerHandle, MODULE_NAME};
use crate::store::KvStore;
use mm_common::{Coins, Result};
use std::collections::BTreeSet;

pub type Invariant<B> = fn(&Keeper<B>, &dyn KvStore) -> (String, bool);

pub const DEPOSIT_RECORDS_ROUTE: &str = "deposit-records";
pub const INCENTIVE_RESERVE_ROUTE: &str = "incentive-reserve";
pub const DEPOSIT_ELIGIBILITY_ROUTE: &str = "deposit-eligibility";

pub fn format_invariant_message(route: &str, msg: &str, broken: bool) -> String {
    let status = if broken { "broken" } else { "ok" };
    format!("{MODULE_NAME}: {route} invariant {status}\n{msg}")
}

fn unreadable(route: &str, err: mm_common::MarketMakerError) -> (String, bool) {
    (format_invariant_message(route, &format!("store unreadable: {err}"), true), true)
}

/// Pending entries and deposit records agree in number, and the deposit reserve
/// covers the recorded sum.
pub fn deposit_records_invariant<B: BankKeeper>(keeper: &Keeper<B>, store: &dyn KvStore) -> (String, bool) {
    let check = || -> Result<(String, bool)> {
        let deposits = registry::deposits(store)?;
        let pending = registry::market_makers(store)?
            .iter()
            .filter(|e| !e.eligible)
            .count();
        let sum = Coins::sum(deposits.iter().map(|d| &d.amount))?;
        let reserve = keeper.bank().module_balance(store, ModuleAccount::DepositReserve)?;

        let count_ok = deposits.len() == pending;
        let balance_ok = reserve.is_all_gte(&sum);
        let broken = !(count_ok && balance_ok);
        let msg = format!(
            "\tpending market makers: {}\n\tdeposit records: {}\n\tdeposit sum: {}\n\tdeposit reserve: {}\n",
            pending,
            deposits.len(),
            sum,
            reserve
        );
        Ok((format_invariant_message(DEPOSIT_RECORDS_ROUTE, &msg, broken), broken))
    };
    check().unwrap_or_else(|e| unreadable(DEPOSIT_RECORDS_ROUTE, e))
}

/// The claimable reserve covers every accrued incentive
pub fn incentive_reserve_invariant<B: BankKeeper>(keeper: &Keeper<B>, store: &dyn KvStore) -> (String, bool) {
    let check = || -> Result<(String, bool)> {
        let incentives = registry::incentives(store)?;
        let sum = Coins::sum(incentives.iter().map(|i| &i.claimable))?;
        let reserve = keeper
            .bank()
            .module_balance(store, ModuleAccount::ClaimableIncentiveReserve)?;

        let broken = !reserve.is_all_gte(&sum);
        let msg = format!(
            "\tincentive records: {}\n\tclaimable sum: {}\n\tclaimable reserve: {}\n",
            incentives.len(),
            sum,
            reserve
        );
        Ok((format_invariant_message(INCENTIVE_RESERVE_ROUTE, &msg, broken), broken))
    };
    check().unwrap_or_else(|e| unreadable(INCENTIVE_RESERVE_ROUTE, e))
}

/// The set of slots with a deposit record is exactly the set of pending slots.
pub fn deposit_eligibility_invariant<B: BankKeeper>(_keeper: &Keeper<B>, store: &dyn KvStore) -> (String, bool) {
    let check = || -> Result<(String, bool)> {
        let entries = registry::market_makers(store)?;
        let pending: BTreeSet<MarketMakerHandle> = entries
            .iter()
            .filter(|e| !e.eligible)
            .map(|e| e.handle())
            .collect();
        let eligible: BTreeSet<MarketMakerHandle> = entries
            .iter()
            .filter(|e| e.eligible)
            .map(|e| e.handle())
            .collect();
        let deposited: BTreeSet<MarketMakerHandle> = registry::deposits(store)?
            .iter()
            .map(|d| MarketMakerHandle::new(d.address, d.pair_id))
            .collect();

        let mut msg = String::new();
        for h in pending.difference(&deposited) {
            msg.push_str(&format!("\tpending {} pair {} has no deposit record\n", h.address, h.pair_id));
        }
        for h in deposited.difference(&pending) {
            if eligible.contains(h) {
                msg.push_str(&format!("\teligible {} pair {} still has a deposit record\n", h.address, h.pair_id));
            } else {
                msg.push_str(&format!("\tdeposit record for {} pair {} has no market maker\n", h.address, h.pair_id));
            }
        }
        let broken = !msg.is_empty();
        Ok((format_invariant_message(DEPOSIT_ELIGIBILITY_ROUTE, &msg, broken), broken))
    };
    check().unwrap_or_else(|e| unreadable(DEPOSIT_ELIGIBILITY_ROUTE, e))
}

/// Every check in sequence; reports the first broken one
pub fn all_invariants<B: BankKeeper>(keeper: &Keeper<B>, store: &dyn KvStore) -> (String, bool) {
    let checks: [Invariant<B>; 3] = [
        deposit_records_invariant,
        incentive_reserve_invariant,
        deposit_eligibility_invariant,
    ];
    let mut last = (String::new(), false);
    for check in checks {
        last = check(keeper, store);
        if last.1 {
            return last;
        }
    }
    last
}

pub struct InvariantRoute<B: BankKeeper> {
    pub module: &'static str,
    pub route: &'static str,
    pub check: Invariant<B>,
}

/// Routes asserted by the host at the end of each block
pub struct InvariantRegistry<B: BankKeeper> {
    routes: Vec<InvariantRoute<B>>,
}

impl<B: BankKeeper> InvariantRegistry<B> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn register(&mut self, module: &'static str, route: &'static str, check: Invariant<B>) {
        self.routes.push(InvariantRoute { module, route, check });
    }

    pub fn routes(&self) -> &[InvariantRoute<B>] {
        &self.routes
    }

    /// Run every route; returns the messages of the broken ones
    pub fn assert_all(&self, keeper: &Keeper<B>, store: &dyn KvStore) -> Vec<String> {
        let mut broken = Vec::new();
        for route in &self.routes {
            let (msg, is_broken) = (route.check)(keeper, store);
            if is_broken {
                log::warn!("invariant {}/{} broken: {}", route.module, route.route, msg);
                broken.push(msg);
            } else {
                log::debug!("invariant {}/{} ok", route.module, route.route);
            }
        }
        broken
    }
}

impl<B: BankKeeper> Default for InvariantRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn register_invariants<B: BankKeeper>(registry: &mut InvariantRegistry<B>) {
    registry.register(MODULE_NAME, DEPOSIT_RECORDS_ROUTE, deposit_records_invariant);
    registry.register(MODULE_NAME, INCENTIVE_RESERVE_ROUTE, incentive_reserve_invariant);
    registry.register(MODULE_NAME, DEPOSIT_ELIGIBILITY_ROUTE, deposit_eligibility_invariant);
}
