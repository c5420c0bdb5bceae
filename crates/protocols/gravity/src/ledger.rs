//! Custody operations the pool relies on
//!
//! Native-origin assets are locked into and unlocked out of module custody.
//! Bridge-originated vouchers are additionally burned after locking and minted
//! back before unlocking.

use std::collections::BTreeMap;

use bridge_core::{AccountId, Coin, LedgerError};
use num_bigint::BigUint;

/// Asset custody subsystem
pub trait Ledger {
    /// Move `amount` from `from` into module custody
    fn lock(&mut self, from: &AccountId, amount: &Coin) -> Result<(), LedgerError>;

    /// Move `amount` from module custody to `to`
    fn unlock(&mut self, to: &AccountId, amount: &Coin) -> Result<(), LedgerError>;

    /// Destroy `amount` held in module custody
    fn burn(&mut self, amount: &Coin) -> Result<(), LedgerError>;

    /// Create `amount` in module custody
    fn mint(&mut self, amount: &Coin) -> Result<(), LedgerError>;
}

/// Switches for the supply-changing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerParams {
    pub burn_enabled: bool,
    pub mint_enabled: bool,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            burn_enabled: true,
            mint_enabled: true,
        }
    }
}

/// In-memory bank with account balances, module custody and total supply
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    params: LedgerParams,
    balances: BTreeMap<(AccountId, String), BigUint>,
    custody: BTreeMap<String, BigUint>,
    supply: BTreeMap<String, BigUint>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(&self) -> LedgerParams {
        self.params
    }

    pub fn set_params(&mut self, params: LedgerParams) {
        self.params = params;
    }

    /// Credit an account with newly issued coins (genesis allocation)
    pub fn fund(&mut self, account: &AccountId, amount: &Coin) {
        *self
            .balances
            .entry((account.clone(), amount.denom.clone()))
            .or_default() += &amount.amount;
        *self.supply.entry(amount.denom.clone()).or_default() += &amount.amount;
    }

    pub fn balance(&self, account: &AccountId, denom: &str) -> BigUint {
        self.balances
            .get(&(account.clone(), denom.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Coins held by the module
    pub fn custody(&self, denom: &str) -> BigUint {
        self.custody.get(denom).cloned().unwrap_or_default()
    }

    pub fn supply(&self, denom: &str) -> BigUint {
        self.supply.get(denom).cloned().unwrap_or_default()
    }
}

/// Subtract `amount` from a map entry, returning what was available on failure
fn debit<K: Ord>(map: &mut BTreeMap<K, BigUint>, key: K, amount: &BigUint) -> Result<(), BigUint> {
    let available = map.get(&key).cloned().unwrap_or_default();
    if available < *amount {
        return Err(available);
    }
    map.insert(key, available - amount);
    Ok(())
}

impl Ledger for MemoryLedger {
    fn lock(&mut self, from: &AccountId, amount: &Coin) -> Result<(), LedgerError> {
        amount.validate()?;
        debit(
            &mut self.balances,
            (from.clone(), amount.denom.clone()),
            &amount.amount,
        )
        .map_err(|available| LedgerError::InsufficientFunds {
            account: from.to_string(),
            denom: amount.denom.clone(),
            required: amount.amount.clone(),
            available,
        })?;
        *self.custody.entry(amount.denom.clone()).or_default() += &amount.amount;
        tracing::trace!(account = %from, coin = %amount, "Locked coins into module custody");
        Ok(())
    }

    fn unlock(&mut self, to: &AccountId, amount: &Coin) -> Result<(), LedgerError> {
        amount.validate()?;
        debit(&mut self.custody, amount.denom.clone(), &amount.amount).map_err(|available| {
            LedgerError::InsufficientCustody {
                denom: amount.denom.clone(),
                required: amount.amount.clone(),
                available,
            }
        })?;
        *self
            .balances
            .entry((to.clone(), amount.denom.clone()))
            .or_default() += &amount.amount;
        tracing::trace!(account = %to, coin = %amount, "Unlocked coins from module custody");
        Ok(())
    }

    fn burn(&mut self, amount: &Coin) -> Result<(), LedgerError> {
        if !self.params.burn_enabled {
            return Err(LedgerError::Disabled { operation: "burn" });
        }
        amount.validate()?;
        debit(&mut self.custody, amount.denom.clone(), &amount.amount).map_err(|available| {
            LedgerError::InsufficientCustody {
                denom: amount.denom.clone(),
                required: amount.amount.clone(),
                available,
            }
        })?;
        // Supply always covers custody, so this cannot underflow.
        let _ = debit(&mut self.supply, amount.denom.clone(), &amount.amount);
        Ok(())
    }

    fn mint(&mut self, amount: &Coin) -> Result<(), LedgerError> {
        if !self.params.mint_enabled {
            return Err(LedgerError::Disabled { operation: "mint" });
        }
        amount.validate()?;
        *self.custody.entry(amount.denom.clone()).or_default() += &amount.amount;
        *self.supply.entry(amount.denom.clone()).or_default() += &amount.amount;
        Ok(())
    }
}
