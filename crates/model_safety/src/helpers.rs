//! Invariant checking helpers

use crate::math::*;
use crate::state::*;

/// Coins are only moved, never created or destroyed
pub fn conservation_ok(s: &State) -> bool {
    let held = sum_u128(s.balances.iter().copied())
        .and_then(|b| add_u128(b, s.budget))
        .and_then(|b| add_u128(b, s.deposit_reserve))
        .and_then(|b| add_u128(b, s.incentive_reserve));
    held == Some(s.supply)
}

/// Pending slots carry a deposit and eligible slots never do; no slot appears twice
pub fn bijection_ok(s: &State) -> bool {
    let paired = s.slots.iter().all(|slot| slot.eligible == slot.deposit.is_none());
    let unique = s.slots.windows(2).all(|w| w[0].key() < w[1].key());
    paired && unique
}

/// The deposit reserve covers every recorded deposit
pub fn deposits_backed_ok(s: &State) -> bool {
    match sum_u128(s.slots.iter().filter_map(|slot| slot.deposit)) {
        Some(total) => s.deposit_reserve >= total,
        None => false,
    }
}

/// The claimable reserve covers every accrued incentive
pub fn incentives_reserved_ok(s: &State) -> bool {
    match sum_u128(s.claimable.iter().copied()) {
        Some(total) => s.incentive_reserve >= total,
        None => false,
    }
}

pub fn all_invariants_ok(s: &State) -> bool {
    conservation_ok(s) && bijection_ok(s) && deposits_backed_ok(s) && incentives_reserved_ok(s)
}
