use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::coin::Coins;

/// Coins held by one address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub address: String,
    pub coins: Coins,
}

/// `bank` module genesis state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankGenesis {
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub supply: Coins,
    /// `params`, `denom_metadata` and anything else the schema adds
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BankGenesis {
    pub fn balance_of(&self, address: &str) -> Option<&Balance> {
        self.balances.iter().find(|balance| balance.address == address)
    }

    /// Add coins to an address, merging into its existing entry if any.
    ///
    /// Supply is left untouched; use [`BankGenesis::mint`] to keep it in step.
    pub fn credit(&mut self, address: &str, coins: &Coins) {
        match self
            .balances
            .iter_mut()
            .find(|balance| balance.address == address)
        {
            Some(balance) => balance.coins = balance.coins.add(coins),
            None => self.balances.push(Balance {
                address: address.to_string(),
                coins: coins.clone(),
            }),
        }
    }

    /// Credit an address and grow supply by the same coins
    pub fn mint(&mut self, address: &str, coins: &Coins) {
        self.credit(address, coins);
        self.supply = self.supply.add(coins);
    }

    /// Sum of every balance
    pub fn balances_total(&self) -> Coins {
        self.balances
            .iter()
            .fold(Coins::empty(), |acc, balance| acc.add(&balance.coins))
    }

    /// Check that supply equals the sum of all balances
    pub fn check_supply(&self) -> Result<(), CoreError> {
        let total = self.balances_total();
        if total != Coins::new(self.supply.iter().cloned().collect()) {
            return Err(CoreError::SupplyMismatch {
                balances: total.to_string(),
                supply: self.supply.to_string(),
            });
        }
        Ok(())
    }
}
