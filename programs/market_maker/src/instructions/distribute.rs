//! Distribute: reserve incentives for eligible slots

use crate::bank::{BankKeeper, ModuleAccount};
use crate::context::Ctx;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::registry;
use crate::state::{IncentiveDistribution, IncentiveRecord};
use mm_common::{Coins, MarketMakerError, Result};

/// Process distribute
///
/// All slots must be eligible before any coin moves. The summed amount is pulled
/// from the incentive budget into the claimable reserve in one transfer, then each
/// line is credited to its address's incentive record.
///
/// There is no distribution id: executing the same items twice pays twice.
pub fn process_distribute_many<B: BankKeeper>(
    keeper: &Keeper<B>,
    ctx: &mut Ctx<'_>,
    items: &[IncentiveDistribution],
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    for item in items {
        if item.amount.is_empty() {
            return Err(MarketMakerError::EmptyIncentive);
        }
        item.amount.validate()?;

        let (address, pair_id) = (item.address, item.pair_id);
        let entry = registry::get_market_maker(ctx.store(), &address, pair_id)?
            .ok_or(MarketMakerError::NotFound { address, pair_id })?;
        if !entry.eligible {
            return Err(MarketMakerError::NotEligible { address, pair_id });
        }
    }

    let total = Coins::sum(items.iter().map(|item| &item.amount))?;
    let params = keeper.params(ctx.store())?;
    keeper.bank().send_coins_from_account_to_module(
        ctx.store_mut(),
        &params.incentive_budget_address,
        ModuleAccount::ClaimableIncentiveReserve,
        &total,
    )?;

    for item in items {
        let claimable = match registry::get_incentive(ctx.store(), &item.address)? {
            Some(record) => record.claimable.checked_add(&item.amount)?,
            None => item.amount.clone(),
        };
        registry::set_incentive(
            ctx.store_mut(),
            &IncentiveRecord {
                address: item.address,
                claimable,
            },
        )?;
        ctx.emit(Event::DistributeIncentive {
            address: item.address,
            pair_id: item.pair_id,
            amount: item.amount.clone(),
        });
    }

    log::debug!("distributed {} across {} lines", total, items.len());
    Ok(())
}
