//! Multi-denomination coin amounts
//!
//! `Coins` is kept sorted by denom with no zero entries once validated. Values read
//! from untrusted input (proposals, genesis files) are not normalised on
//! deserialization; call [`Coins::validate`] before using them.

use crate::error::{MarketMakerError, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Denom rule: `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`
pub fn validate_denom(denom: &str) -> Result<()> {
    let bytes = denom.as_bytes();
    if bytes.len() < 3 || bytes.len() > 128 {
        return Err(MarketMakerError::InvalidCoins(format!(
            "invalid denom length: {denom}"
        )));
    }
    if !bytes[0].is_ascii_alphabetic() {
        return Err(MarketMakerError::InvalidCoins(format!(
            "denom must start with a letter: {denom}"
        )));
    }
    let ok = bytes[1..]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'));
    if !ok {
        return Err(MarketMakerError::InvalidCoins(format!(
            "invalid denom: {denom}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build normalised coins: merges duplicate denoms, drops zeros, sorts.
    pub fn new(coins: Vec<Coin>) -> Result<Self> {
        let mut merged: BTreeMap<String, u128> = BTreeMap::new();
        for coin in coins {
            validate_denom(&coin.denom)?;
            let slot = merged.entry(coin.denom).or_insert(0);
            *slot = slot.checked_add(coin.amount).ok_or(MarketMakerError::Overflow)?;
        }
        Ok(Self::from_map(merged))
    }

    pub fn from_coin(denom: impl Into<String>, amount: u128) -> Self {
        if amount == 0 {
            return Self::empty();
        }
        Self(vec![Coin::new(denom, amount)])
    }

    fn from_map(map: BTreeMap<String, u128>) -> Self {
        Self(
            map.into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    fn to_map(&self) -> BTreeMap<String, u128> {
        self.0.iter().map(|c| (c.denom.clone(), c.amount)).collect()
    }

    /// Well-formed: valid denoms, positive amounts, strictly ascending denoms
    pub fn validate(&self) -> Result<()> {
        for (i, coin) in self.0.iter().enumerate() {
            validate_denom(&coin.denom)?;
            if coin.amount == 0 {
                return Err(MarketMakerError::InvalidCoins(format!(
                    "coin {} has zero amount",
                    coin.denom
                )));
            }
            if i > 0 && self.0[i - 1].denom >= coin.denom {
                return Err(MarketMakerError::InvalidCoins(format!(
                    "denoms not sorted or duplicated: {self}"
                )));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| c.amount == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    pub fn checked_add(&self, other: &Coins) -> Result<Coins> {
        let mut map = self.to_map();
        for coin in &other.0 {
            let slot = map.entry(coin.denom.clone()).or_insert(0);
            *slot = slot.checked_add(coin.amount).ok_or(MarketMakerError::Overflow)?;
        }
        Ok(Self::from_map(map))
    }

    /// `None` when any denom would go negative
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut map = self.to_map();
        for coin in &other.0 {
            if coin.amount == 0 {
                continue;
            }
            let slot = map.get_mut(&coin.denom)?;
            *slot = slot.checked_sub(coin.amount)?;
        }
        Some(Self::from_map(map))
    }

    pub fn checked_mul(&self, factor: u128) -> Result<Coins> {
        let mut out = Vec::with_capacity(self.0.len());
        for coin in &self.0 {
            let amount = coin.amount.checked_mul(factor).ok_or(MarketMakerError::Overflow)?;
            out.push(Coin::new(coin.denom.clone(), amount));
        }
        Ok(Self::from_map(
            out.into_iter().map(|c| (c.denom, c.amount)).collect(),
        ))
    }

    /// Every denom in `other` is covered by `self`
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other.0.iter().all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// Sum a sequence of coin amounts
    pub fn sum<'a>(items: impl IntoIterator<Item = &'a Coins>) -> Result<Coins> {
        items
            .into_iter()
            .try_fold(Coins::empty(), |acc, c| acc.checked_add(c))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}

impl FromStr for Coins {
    type Err = MarketMakerError;

    /// Parses `"100stake,50uatom"`; an empty string is empty coins.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Coins::empty());
        }
        let mut coins = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let split = part
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(|| MarketMakerError::InvalidCoins(format!("missing denom: {part}")))?;
            let (amount, denom) = part.split_at(split);
            let amount: u128 = amount
                .parse()
                .map_err(|_| MarketMakerError::InvalidCoins(format!("invalid amount: {part}")))?;
            coins.push(Coin::new(denom, amount));
        }
        Coins::new(coins)
    }
}
