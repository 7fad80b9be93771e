//! Market-maker state transition handlers
//!
//! Handlers run directly against the context they are given; atomicity is the
//! caller's job (see `Keeper` and the proposal handler).

pub mod apply;
pub mod claim;
pub mod distribute;
pub mod exclude;
pub mod include;
pub mod reject;

pub use apply::*;
pub use claim::*;
pub use distribute::*;
pub use exclude::*;
pub use include::*;
pub use reject::*;

use crate::bank::{BankKeeper, ModuleAccount};
use crate::context::Ctx;
use crate::keeper::Keeper;
use crate::registry;
use mm_common::{Address, MarketMakerError, PairId, Result};

/// Return the recorded deposit of a pending slot to its owner and drop the record
pub(crate) fn refund_deposit<B: BankKeeper>(
    keeper: &Keeper<B>,
    ctx: &mut Ctx<'_>,
    address: Address,
    pair_id: PairId,
) -> Result<()> {
    let deposit = registry::get_deposit(ctx.store(), &address, pair_id)?
        .ok_or(MarketMakerError::InvalidDeposit { address, pair_id })?;

    keeper.bank().send_coins_from_module_to_account(
        ctx.store_mut(),
        ModuleAccount::DepositReserve,
        &address,
        &deposit.amount,
    )?;
    registry::delete_deposit(ctx.store_mut(), &address, pair_id);

    log::debug!("refunded {} to {} for pair {}", deposit.amount, address, pair_id);
    Ok(())
}
