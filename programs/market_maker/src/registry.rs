//! Registry store: typed access to market makers, deposits, incentives and params

use crate::state::{DepositRecord, IncentiveRecord, MarketMakerEntry, Params};
use crate::store::*;
use mm_common::{Address, PairId, Result};

pub fn get_market_maker(
    store: &dyn KvStore,
    address: &Address,
    pair_id: PairId,
) -> Result<Option<MarketMakerEntry>> {
    store
        .get(&market_maker_key(address, pair_id))
        .map(|bytes| decode(&bytes))
        .transpose()
}

/// Writes the entry and its by-pair index
pub fn set_market_maker(store: &mut dyn KvStore, entry: &MarketMakerEntry) -> Result<()> {
    store.set(&market_maker_key(&entry.address, entry.pair_id), encode(entry)?);
    store.set(&market_maker_index_key(entry.pair_id, &entry.address), Vec::new());
    Ok(())
}

pub fn delete_market_maker(store: &mut dyn KvStore, address: &Address, pair_id: PairId) {
    store.delete(&market_maker_key(address, pair_id));
    store.delete(&market_maker_index_key(pair_id, address));
}

pub fn market_makers(store: &dyn KvStore) -> Result<Vec<MarketMakerEntry>> {
    decode_all(store, &[MARKET_MAKER_KEY_PREFIX])
}

pub fn market_makers_by_address(store: &dyn KvStore, address: &Address) -> Result<Vec<MarketMakerEntry>> {
    decode_all(store, &market_makers_by_address_prefix(address))
}

pub fn market_makers_by_pair(store: &dyn KvStore, pair_id: PairId) -> Result<Vec<MarketMakerEntry>> {
    let mut out = Vec::new();
    for (key, _) in store.scan_prefix(&market_makers_by_pair_prefix(pair_id)) {
        let (pair_id, address) = parse_market_maker_index_key(&key)?;
        if let Some(entry) = get_market_maker(store, &address, pair_id)? {
            out.push(entry);
        }
    }
    Ok(out)
}

pub fn get_deposit(store: &dyn KvStore, address: &Address, pair_id: PairId) -> Result<Option<DepositRecord>> {
    store
        .get(&deposit_key(address, pair_id))
        .map(|bytes| decode(&bytes))
        .transpose()
}

pub fn set_deposit(store: &mut dyn KvStore, deposit: &DepositRecord) -> Result<()> {
    store.set(&deposit_key(&deposit.address, deposit.pair_id), encode(deposit)?);
    Ok(())
}

pub fn delete_deposit(store: &mut dyn KvStore, address: &Address, pair_id: PairId) {
    store.delete(&deposit_key(address, pair_id));
}

pub fn deposits(store: &dyn KvStore) -> Result<Vec<DepositRecord>> {
    decode_all(store, &[DEPOSIT_KEY_PREFIX])
}

pub fn get_incentive(store: &dyn KvStore, address: &Address) -> Result<Option<IncentiveRecord>> {
    store
        .get(&incentive_key(address))
        .map(|bytes| decode(&bytes))
        .transpose()
}

pub fn set_incentive(store: &mut dyn KvStore, incentive: &IncentiveRecord) -> Result<()> {
    store.set(&incentive_key(&incentive.address), encode(incentive)?);
    Ok(())
}

pub fn delete_incentive(store: &mut dyn KvStore, address: &Address) {
    store.delete(&incentive_key(address));
}

pub fn incentives(store: &dyn KvStore) -> Result<Vec<IncentiveRecord>> {
    decode_all(store, &[INCENTIVE_KEY_PREFIX])
}

/// Stored params, or defaults before genesis has written any
pub fn get_params(store: &dyn KvStore) -> Result<Params> {
    match store.get(PARAMS_KEY) {
        Some(bytes) => decode(&bytes),
        None => Ok(Params::default()),
    }
}

pub fn set_params(store: &mut dyn KvStore, params: &Params) -> Result<()> {
    store.set(PARAMS_KEY, encode(params)?);
    Ok(())
}

fn decode_all<T: serde::de::DeserializeOwned>(store: &dyn KvStore, prefix: &[u8]) -> Result<Vec<T>> {
    store
        .scan_prefix(prefix)
        .into_iter()
        .map(|(_, value)| decode(&value))
        .collect()
}
