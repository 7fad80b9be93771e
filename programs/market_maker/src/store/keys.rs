//! Persisted key layout
//!
//! ```text
//! 0x02 | addr                  -> bank balance (Coins)
//! 0xc0 | addr | pair_id(be)    -> MarketMakerEntry
//! 0xc1 | pair_id(be) | addr    -> ()            by-pair index
//! 0xc2 | addr | pair_id(be)    -> DepositRecord
//! 0xc3 | addr                  -> IncentiveRecord
//! 0xc4                         -> Params
//! ```
//! Pair ids are big-endian so that prefix iteration visits them in numeric order.

use mm_common::{Address, MarketMakerError, PairId, Result, ADDRESS_LEN};

pub const BALANCE_KEY_PREFIX: u8 = 0x02;
pub const MARKET_MAKER_KEY_PREFIX: u8 = 0xc0;
pub const MARKET_MAKER_INDEX_KEY_PREFIX: u8 = 0xc1;
pub const DEPOSIT_KEY_PREFIX: u8 = 0xc2;
pub const INCENTIVE_KEY_PREFIX: u8 = 0xc3;
pub const PARAMS_KEY: &[u8] = &[0xc4];

const PAIR_ID_LEN: usize = 8;

fn address_pair_key(prefix: u8, address: &Address, pair_id: PairId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + ADDRESS_LEN + PAIR_ID_LEN);
    key.push(prefix);
    key.extend_from_slice(address.as_bytes());
    key.extend_from_slice(&pair_id.to_be_bytes());
    key
}

fn address_key(prefix: u8, address: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + ADDRESS_LEN);
    key.push(prefix);
    key.extend_from_slice(address.as_bytes());
    key
}

pub fn balance_key(address: &Address) -> Vec<u8> {
    address_key(BALANCE_KEY_PREFIX, address)
}

pub fn market_maker_key(address: &Address, pair_id: PairId) -> Vec<u8> {
    address_pair_key(MARKET_MAKER_KEY_PREFIX, address, pair_id)
}

pub fn market_makers_by_address_prefix(address: &Address) -> Vec<u8> {
    address_key(MARKET_MAKER_KEY_PREFIX, address)
}

pub fn market_maker_index_key(pair_id: PairId, address: &Address) -> Vec<u8> {
    let mut key = market_makers_by_pair_prefix(pair_id);
    key.extend_from_slice(address.as_bytes());
    key
}

pub fn market_makers_by_pair_prefix(pair_id: PairId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + PAIR_ID_LEN + ADDRESS_LEN);
    key.push(MARKET_MAKER_INDEX_KEY_PREFIX);
    key.extend_from_slice(&pair_id.to_be_bytes());
    key
}

/// Split a by-pair index key back into `(pair_id, address)`
pub fn parse_market_maker_index_key(key: &[u8]) -> Result<(PairId, Address)> {
    if key.len() != 1 + PAIR_ID_LEN + ADDRESS_LEN || key[0] != MARKET_MAKER_INDEX_KEY_PREFIX {
        return Err(MarketMakerError::Codec(format!(
            "malformed market maker index key of {} bytes",
            key.len()
        )));
    }
    let mut pair = [0u8; PAIR_ID_LEN];
    pair.copy_from_slice(&key[1..1 + PAIR_ID_LEN]);
    let address = Address::from_slice(&key[1 + PAIR_ID_LEN..])?;
    Ok((PairId::from_be_bytes(pair), address))
}

pub fn deposit_key(address: &Address, pair_id: PairId) -> Vec<u8> {
    address_pair_key(DEPOSIT_KEY_PREFIX, address, pair_id)
}

pub fn incentive_key(address: &Address) -> Vec<u8> {
    address_key(INCENTIVE_KEY_PREFIX, address)
}
