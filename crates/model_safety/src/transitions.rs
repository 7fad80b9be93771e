//! State transition functions - all total, no panics
//!
//! Every transition either applies in full or returns the input state unchanged.

use crate::math::*;
use crate::state::*;

fn atomic<F: FnOnce(&mut State) -> Option<()>>(s: State, f: F) -> State {
    let mut next = s.clone();
    match f(&mut next) {
        Some(()) => next,
        None => s,
    }
}

fn user_index(s: &State, user: u8) -> Option<usize> {
    let uid = usize::from(user);
    if uid < s.user_count() {
        Some(uid)
    } else {
        None
    }
}

fn slot_index(s: &State, user: u8, pair: u64) -> Option<usize> {
    s.slots.iter().position(|slot| slot.key() == (user, pair))
}

fn insert_slot(s: &mut State, slot: Slot) -> Option<()> {
    let at = s.slots.iter().position(|other| other.key() > slot.key()).unwrap_or(s.slots.len());
    s.slots.try_insert(at, slot).ok()
}

fn refund(s: &mut State, uid: usize, amount: u128) -> Option<()> {
    s.deposit_reserve = sub_u128(s.deposit_reserve, amount)?;
    s.balances[uid] = add_u128(s.balances[uid], amount)?;
    Some(())
}

/// Apply for `pairs`: escrow `deposit_amount` per pair, register pending slots
pub fn apply(s: State, user: u8, pairs: &[u64]) -> State {
    atomic(s, |s| {
        let uid = user_index(s, user)?;
        if pairs.is_empty() {
            return None;
        }
        for (i, &pair) in pairs.iter().enumerate() {
            if pairs[..i].contains(&pair) || s.slot(user, pair).is_some() || !s.is_pair(pair) {
                return None;
            }
        }

        let amount = s.params.deposit_amount;
        let total = mul_count(amount, pairs.len())?;
        s.balances[uid] = sub_u128(s.balances[uid], total)?;
        s.deposit_reserve = add_u128(s.deposit_reserve, total)?;

        for &pair in pairs {
            insert_slot(
                s,
                Slot {
                    user,
                    pair,
                    eligible: false,
                    deposit: Some(amount),
                },
            )?;
        }
        Some(())
    })
}

/// Approve pending slots in order and refund their deposits
pub fn include(s: State, handles: &[(u8, u64)]) -> State {
    atomic(s, |s| {
        for &(user, pair) in handles {
            let idx = slot_index(s, user, pair)?;
            let slot = s.slots[idx];
            if slot.eligible {
                return None;
            }
            let deposit = slot.deposit?;
            let uid = user_index(s, user)?;
            s.slots[idx].eligible = true;
            s.slots[idx].deposit = None;
            refund(s, uid, deposit)?;
        }
        Some(())
    })
}

/// Remove eligible slots; accrued incentives stay
pub fn exclude(s: State, handles: &[(u8, u64)]) -> State {
    atomic(s, |s| {
        for &(user, pair) in handles {
            let idx = slot_index(s, user, pair)?;
            if !s.slots[idx].eligible {
                return None;
            }
            s.slots.remove(idx);
        }
        Some(())
    })
}

/// Remove pending slots and refund their deposits
pub fn reject(s: State, handles: &[(u8, u64)]) -> State {
    atomic(s, |s| {
        for &(user, pair) in handles {
            let idx = slot_index(s, user, pair)?;
            let slot = s.slots[idx];
            if slot.eligible {
                return None;
            }
            let deposit = slot.deposit?;
            let uid = user_index(s, user)?;
            s.slots.remove(idx);
            refund(s, uid, deposit)?;
        }
        Some(())
    })
}

/// Move incentives from the budget into the claimable reserve.
/// Every line must name an eligible slot and a non-zero amount.
pub fn distribute(s: State, items: &[(u8, u64, u128)]) -> State {
    atomic(s, |s| {
        if items.is_empty() {
            return Some(());
        }
        for &(user, pair, amount) in items {
            if amount == 0 || !s.slot(user, pair)?.eligible {
                return None;
            }
        }

        let total = sum_u128(items.iter().map(|&(_, _, amount)| amount))?;
        s.budget = sub_u128(s.budget, total)?;
        s.incentive_reserve = add_u128(s.incentive_reserve, total)?;

        for &(user, _, amount) in items {
            let uid = user_index(s, user)?;
            s.claimable[uid] = add_u128(s.claimable[uid], amount)?;
        }
        Some(())
    })
}

/// Pay out the whole claimable balance of `user`
pub fn claim(s: State, user: u8) -> State {
    atomic(s, |s| {
        let uid = user_index(s, user)?;
        let amount = s.claimable[uid];
        if amount == 0 {
            return None;
        }
        s.incentive_reserve = sub_u128(s.incentive_reserve, amount)?;
        s.balances[uid] = add_u128(s.balances[uid], amount)?;
        s.claimable[uid] = 0;
        Some(())
    })
}

/// Change the per-pair deposit; existing deposits keep their recorded amount
pub fn set_deposit_amount(mut s: State, amount: u128) -> State {
    s.params.deposit_amount = amount;
    s
}
