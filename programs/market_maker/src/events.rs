//! Events emitted by state transitions

use mm_common::{Address, Coins, PairId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ApplyMarketMaker {
        address: Address,
        pair_ids: Vec<PairId>,
    },
    IncludeMarketMaker {
        address: Address,
        pair_id: PairId,
    },
    ExcludeMarketMaker {
        address: Address,
        pair_id: PairId,
    },
    RejectMarketMaker {
        address: Address,
        pair_id: PairId,
    },
    DistributeIncentive {
        address: Address,
        pair_id: PairId,
        amount: Coins,
    },
    ClaimIncentives {
        address: Address,
        amount: Coins,
    },
}
