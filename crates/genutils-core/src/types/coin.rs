use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::math::Int;

/// A single token amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Int,
}

impl Coin {
    pub fn new(denom: &str, amount: u64) -> Self {
        Coin::from_int(denom, Int::new(amount))
    }

    pub fn from_int(denom: &str, amount: Int) -> Self {
        Coin {
            denom: denom.to_string(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins with unique denominations.
///
/// Input order is preserved; merging produces denom-sorted output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Self {
        Coins(Vec::new())
    }

    /// Build from arbitrary coins, merging duplicates and sorting by denom
    pub fn new(coins: Vec<Coin>) -> Self {
        let mut merged: BTreeMap<String, Int> = BTreeMap::new();
        for coin in coins {
            *merged.entry(coin.denom).or_default() += &coin.amount;
        }
        Coins(
            merged
                .into_iter()
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }

    pub fn amount_of(&self, denom: &str) -> Int {
        self.0
            .iter()
            .find(|coin| coin.denom == denom)
            .map(|coin| coin.amount.clone())
            .unwrap_or_default()
    }

    pub fn add(&self, other: &Coins) -> Coins {
        Coins::new(self.0.iter().chain(other.0.iter()).cloned().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = String;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::BTreeSet::new();
        for coin in &coins {
            if !seen.insert(coin.denom.as_str()) {
                return Err(format!("duplicate denomination: {}", coin.denom));
            }
        }
        Ok(Coins(coins))
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        Coins(vec![coin])
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}
