//! Include: approve pending slots and refund their deposits

use super::refund_deposit;
use crate::bank::BankKeeper;
use crate::context::Ctx;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::registry;
use crate::state::MarketMakerHandle;
use mm_common::{MarketMakerError, Result};

/// Process include
///
/// Handles are processed in order; the first failing handle fails the batch.
/// The refund is the amount recorded at apply time, not the current parameter.
pub fn process_include_many<B: BankKeeper>(
    keeper: &Keeper<B>,
    ctx: &mut Ctx<'_>,
    handles: &[MarketMakerHandle],
) -> Result<()> {
    for handle in handles {
        let MarketMakerHandle { address, pair_id } = *handle;
        let mut entry = registry::get_market_maker(ctx.store(), &address, pair_id)?
            .ok_or(MarketMakerError::NotFound { address, pair_id })?;
        if entry.eligible {
            return Err(MarketMakerError::AlreadyEligible { address, pair_id });
        }

        entry.eligible = true;
        registry::set_market_maker(ctx.store_mut(), &entry)?;
        refund_deposit(keeper, ctx, address, pair_id)?;

        log::debug!("included {} for pair {}", address, pair_id);
        ctx.emit(Event::IncludeMarketMaker { address, pair_id });
    }
    Ok(())
}
