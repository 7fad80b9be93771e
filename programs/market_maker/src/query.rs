//! Read-only queries over the registry

use crate::registry;
use crate::state::{IncentiveRecord, MarketMakerEntry, Params};
use crate::store::KvStore;
use mm_common::{Address, MarketMakerError, PairId, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: usize = 100;
pub const MAX_PAGE_LIMIT: usize = 1_000;

/// Narrows `market_makers`; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketMakerFilter {
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub pair_id: Option<PairId>,
    #[serde(default)]
    pub eligible: Option<bool>,
}

impl MarketMakerFilter {
    fn matches(&self, entry: &MarketMakerEntry) -> bool {
        self.address.map_or(true, |a| a == entry.address)
            && self.pair_id.map_or(true, |p| p == entry.pair_id)
            && self.eligible.map_or(true, |e| e == entry.eligible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches before pagination
    pub total: usize,
}

/// List entries matching `filter`.
///
/// Uses the by-address prefix when an address is given, the by-pair index when
/// only a pair is given, and a full scan otherwise.
pub fn market_makers(
    store: &dyn KvStore,
    filter: &MarketMakerFilter,
    page: PageRequest,
) -> Result<Page<MarketMakerEntry>> {
    if page.limit == 0 || page.limit > MAX_PAGE_LIMIT {
        return Err(MarketMakerError::InvalidRequest(format!(
            "page limit must be within 1..={MAX_PAGE_LIMIT}"
        )));
    }

    let candidates = match (filter.address, filter.pair_id) {
        (Some(address), _) => registry::market_makers_by_address(store, &address)?,
        (None, Some(pair_id)) => registry::market_makers_by_pair(store, pair_id)?,
        (None, None) => registry::market_makers(store)?,
    };
    let matched: Vec<MarketMakerEntry> = candidates.into_iter().filter(|e| filter.matches(e)).collect();
    let total = matched.len();
    let items = matched.into_iter().skip(page.offset).take(page.limit).collect();
    Ok(Page { items, total })
}

pub fn market_maker(store: &dyn KvStore, address: &Address, pair_id: PairId) -> Result<MarketMakerEntry> {
    registry::get_market_maker(store, address, pair_id)?.ok_or(MarketMakerError::NotFound {
        address: *address,
        pair_id,
    })
}

/// Accrued incentive of `address`; an address with nothing accrued gets an empty record
pub fn incentive(store: &dyn KvStore, address: &Address) -> Result<IncentiveRecord> {
    Ok(registry::get_incentive(store, address)?.unwrap_or_else(|| IncentiveRecord {
        address: *address,
        claimable: Default::default(),
    }))
}

pub fn params(store: &dyn KvStore) -> Result<Params> {
    registry::get_params(store)
}
