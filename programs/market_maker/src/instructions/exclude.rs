//! Exclude: revoke eligible slots

use crate::bank::BankKeeper;
use crate::context::Ctx;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::registry;
use crate::state::MarketMakerHandle;
use mm_common::{MarketMakerError, Result};

/// Process exclude
///
/// Deletes eligible entries. Nothing is refunded; the deposit went back at
/// inclusion. Accrued incentives stay claimable.
pub fn process_exclude_many<B: BankKeeper>(
    _keeper: &Keeper<B>,
    ctx: &mut Ctx<'_>,
    handles: &[MarketMakerHandle],
) -> Result<()> {
    for handle in handles {
        let MarketMakerHandle { address, pair_id } = *handle;
        let entry = registry::get_market_maker(ctx.store(), &address, pair_id)?
            .ok_or(MarketMakerError::NotFound { address, pair_id })?;
        if !entry.eligible {
            return Err(MarketMakerError::StillPending { address, pair_id });
        }

        registry::delete_market_maker(ctx.store_mut(), &address, pair_id);

        log::debug!("excluded {} from pair {}", address, pair_id);
        ctx.emit(Event::ExcludeMarketMaker { address, pair_id });
    }
    Ok(())
}
