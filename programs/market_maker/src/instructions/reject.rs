//! Reject: turn down pending slots and refund their deposits

use super::refund_deposit;
use crate::bank::BankKeeper;
use crate::context::Ctx;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::registry;
use crate::state::MarketMakerHandle;
use mm_common::{MarketMakerError, Result};

/// Process reject
///
/// Deletes pending entries and refunds each recorded deposit to its owner.
pub fn process_reject_many<B: BankKeeper>(
    keeper: &Keeper<B>,
    ctx: &mut Ctx<'_>,
    handles: &[MarketMakerHandle],
) -> Result<()> {
    for handle in handles {
        let MarketMakerHandle { address, pair_id } = *handle;
        let entry = registry::get_market_maker(ctx.store(), &address, pair_id)?
            .ok_or(MarketMakerError::NotFound { address, pair_id })?;
        if entry.eligible {
            return Err(MarketMakerError::AlreadyEligible { address, pair_id });
        }

        registry::delete_market_maker(ctx.store_mut(), &address, pair_id);
        refund_deposit(keeper, ctx, address, pair_id)?;

        log::debug!("rejected {} for pair {}", address, pair_id);
        ctx.emit(Event::RejectMarketMaker { address, pair_id });
    }
    Ok(())
}
