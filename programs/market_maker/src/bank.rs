//! Balance-transfer capability
//!
//! The program consumes the bank through [`BankKeeper`]; it never reads or writes
//! balance keys directly. [`StoreBank`] keeps balances in the same store as the
//! registry so one unit of work covers both.

use crate::store::{balance_key, decode, encode, KvStore, BALANCE_KEY_PREFIX};
use mm_common::{Address, Coins, MarketMakerError, Result};
use serde::{Deserialize, Serialize};

/// Pooled accounts owned by the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleAccount {
    DepositReserve,
    ClaimableIncentiveReserve,
}

impl ModuleAccount {
    pub fn name(&self) -> &'static str {
        match self {
            ModuleAccount::DepositReserve => "marketmaker/DepositReserveAcc",
            ModuleAccount::ClaimableIncentiveReserve => "marketmaker/ClaimableIncentiveReserveAcc",
        }
    }

    pub fn address(&self) -> Address {
        Address::module(self.name())
    }
}

pub trait BankKeeper {
    fn balance(&self, store: &dyn KvStore, address: &Address) -> Result<Coins>;

    fn send_coins(
        &self,
        store: &mut dyn KvStore,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<()>;

    /// Create coins out of nothing (genesis and tests only)
    fn mint(&self, store: &mut dyn KvStore, to: &Address, amount: &Coins) -> Result<()>;

    fn send_coins_from_account_to_module(
        &self,
        store: &mut dyn KvStore,
        from: &Address,
        module: ModuleAccount,
        amount: &Coins,
    ) -> Result<()> {
        self.send_coins(store, from, &module.address(), amount)
    }

    fn send_coins_from_module_to_account(
        &self,
        store: &mut dyn KvStore,
        module: ModuleAccount,
        to: &Address,
        amount: &Coins,
    ) -> Result<()> {
        self.send_coins(store, &module.address(), to, amount)
    }

    fn module_balance(&self, store: &dyn KvStore, module: ModuleAccount) -> Result<Coins> {
        self.balance(store, &module.address())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: Address,
    pub coins: Coins,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankGenesis {
    pub balances: Vec<Balance>,
}

/// Bank backed by balance keys in the shared store
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreBank;

impl StoreBank {
    fn set_balance(&self, store: &mut dyn KvStore, address: &Address, coins: &Coins) -> Result<()> {
        let key = balance_key(address);
        if coins.is_empty() {
            store.delete(&key);
        } else {
            store.set(&key, encode(coins)?);
        }
        Ok(())
    }

    pub fn all_balances(&self, store: &dyn KvStore) -> Result<Vec<Balance>> {
        store
            .scan_prefix(&[BALANCE_KEY_PREFIX])
            .into_iter()
            .map(|(key, value)| {
                Ok(Balance {
                    address: Address::from_slice(&key[1..])?,
                    coins: decode(&value)?,
                })
            })
            .collect()
    }

    pub fn init_genesis(&self, store: &mut dyn KvStore, genesis: &BankGenesis) -> Result<()> {
        for balance in &genesis.balances {
            balance.coins.validate()?;
            self.mint(store, &balance.address, &balance.coins)?;
        }
        Ok(())
    }

    pub fn export_genesis(&self, store: &dyn KvStore) -> Result<BankGenesis> {
        Ok(BankGenesis {
            balances: self.all_balances(store)?,
        })
    }
}

impl BankKeeper for StoreBank {
    fn balance(&self, store: &dyn KvStore, address: &Address) -> Result<Coins> {
        match store.get(&balance_key(address)) {
            Some(bytes) => decode(&bytes),
            None => Ok(Coins::empty()),
        }
    }

    fn send_coins(
        &self,
        store: &mut dyn KvStore,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<()> {
        if amount.is_empty() {
            return Ok(());
        }
        let available = self.balance(store, from)?;
        let remaining = available.checked_sub(amount).ok_or_else(|| {
            MarketMakerError::InsufficientFunds {
                address: *from,
                available: available.to_string(),
                required: amount.to_string(),
            }
        })?;
        self.set_balance(store, from, &remaining)?;
        let credited = self.balance(store, to)?.checked_add(amount)?;
        self.set_balance(store, to, &credited)
    }

    fn mint(&self, store: &mut dyn KvStore, to: &Address, amount: &Coins) -> Result<()> {
        let credited = self.balance(store, to)?.checked_add(amount)?;
        self.set_balance(store, to, &credited)
    }
}
