//! Apply: escrow a deposit and register pending slots

use crate::bank::{BankKeeper, ModuleAccount};
use crate::context::Ctx;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::registry;
use crate::state::{DepositRecord, MarketMakerEntry};
use mm_common::{Address, MarketMakerError, PairId, Result};
use std::collections::BTreeSet;

/// Process apply
///
/// Every pair id is checked before anything is written: the slot must be free
/// (a repeated id in the same call counts as taken) and the pair must be
/// whitelisted. The whole deposit moves in one transfer, then one pending entry and
/// one deposit record per pair are stored with the deposit amount in force now.
pub fn process_apply<B: BankKeeper>(
    keeper: &Keeper<B>,
    ctx: &mut Ctx<'_>,
    address: Address,
    pair_ids: &[PairId],
) -> Result<()> {
    if pair_ids.is_empty() {
        return Err(MarketMakerError::EmptyPairIds);
    }

    let params = keeper.params(ctx.store())?;

    let mut seen = BTreeSet::new();
    for &pair_id in pair_ids {
        if !seen.insert(pair_id) || registry::get_market_maker(ctx.store(), &address, pair_id)?.is_some() {
            return Err(MarketMakerError::AlreadyExists { address, pair_id });
        }
        if !params.is_incentive_pair(pair_id) {
            return Err(MarketMakerError::UnregisteredPair(pair_id));
        }
    }

    let total = params.deposit_amount.checked_mul(pair_ids.len() as u128)?;
    keeper.bank().send_coins_from_account_to_module(
        ctx.store_mut(),
        &address,
        ModuleAccount::DepositReserve,
        &total,
    )?;

    for &pair_id in pair_ids {
        registry::set_market_maker(
            ctx.store_mut(),
            &MarketMakerEntry {
                address,
                pair_id,
                eligible: false,
            },
        )?;
        registry::set_deposit(
            ctx.store_mut(),
            &DepositRecord {
                address,
                pair_id,
                amount: params.deposit_amount.clone(),
            },
        )?;
    }

    log::debug!("{} applied for pairs {:?}, escrowed {}", address, pair_ids, total);
    ctx.emit(Event::ApplyMarketMaker {
        address,
        pair_ids: pair_ids.to_vec(),
    });
    Ok(())
}
