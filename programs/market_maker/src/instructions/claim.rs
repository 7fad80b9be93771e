//! Claim: pay out the whole claimable balance of an address

use crate::bank::{BankKeeper, ModuleAccount};
use crate::context::Ctx;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::registry;
use mm_common::{Address, MarketMakerError, Result};

/// Process claim
///
/// Fails with `EmptyClaimable` when nothing has accrued.
pub fn process_claim<B: BankKeeper>(keeper: &Keeper<B>, ctx: &mut Ctx<'_>, address: Address) -> Result<()> {
    let record = match registry::get_incentive(ctx.store(), &address)? {
        Some(record) if !record.claimable.is_empty() => record,
        _ => return Err(MarketMakerError::EmptyClaimable(address)),
    };

    keeper.bank().send_coins_from_module_to_account(
        ctx.store_mut(),
        ModuleAccount::ClaimableIncentiveReserve,
        &address,
        &record.claimable,
    )?;
    registry::delete_incentive(ctx.store_mut(), &address);

    log::debug!("{} claimed {}", address, record.claimable);
    ctx.emit(Event::ClaimIncentives {
        address,
        amount: record.claimable,
    });
    Ok(())
}
