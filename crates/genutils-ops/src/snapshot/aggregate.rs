use std::collections::HashMap;
use tracing::{debug, info, warn};

use genutils_core::{Int, StakingGenesis, Validator};

use crate::error::OpsError;

/// Stake accumulated by one delegator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAccount {
    pub address: String,
    pub staked: Int,
}

/// Per-delegator staked totals, in the order delegators were first seen
#[derive(Debug, Clone, Default)]
pub struct StakedBalances {
    accounts: Vec<DerivedAccount>,
    index: HashMap<String, usize>,
    skipped: usize,
}

impl StakedBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add stake to a delegator, creating its entry on first sight
    pub fn credit(&mut self, address: &str, amount: Int) {
        match self.index.get(address) {
            Some(&position) => self.accounts[position].staked += &amount,
            None => {
                self.index.insert(address.to_string(), self.accounts.len());
                self.accounts.push(DerivedAccount {
                    address: address.to_string(),
                    staked: amount,
                });
            }
        }
    }

    pub fn get(&self, address: &str) -> Option<&Int> {
        self.index
            .get(address)
            .map(|&position| &self.accounts[position].staked)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DerivedAccount> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Delegations left out because their validator was unusable
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn total(&self) -> Int {
        self.accounts.iter().map(|account| account.staked.clone()).sum()
    }
}

/// Index validators by operator address. A repeated operator replaces the
/// earlier entry.
fn index_validators(validators: &[Validator]) -> HashMap<&str, &Validator> {
    let mut index = HashMap::with_capacity(validators.len());
    for validator in validators {
        if index
            .insert(validator.operator_address.as_str(), validator)
            .is_some()
        {
            warn!(
                operator = %validator.operator_address,
                "Duplicate validator operator address, keeping the last entry"
            );
        }
    }
    index
}

/// Convert every delegation to tokens and sum them per delegator.
///
/// Delegations to unknown validators, or to validators without any shares,
/// are skipped and counted in [`StakedBalances::skipped`].
pub fn aggregate_staked_balances(staking: &StakingGenesis) -> Result<StakedBalances, OpsError> {
    let validators = index_validators(&staking.validators);
    let mut balances = StakedBalances::new();

    for delegation in &staking.delegations {
        let Some(validator) = validators.get(delegation.validator_address.as_str()) else {
            warn!(
                delegator = %delegation.delegator_address,
                validator = %delegation.validator_address,
                "Delegation to unknown validator, skipping"
            );
            balances.skipped += 1;
            continue;
        };

        if validator.delegator_shares.is_zero() {
            warn!(
                delegator = %delegation.delegator_address,
                validator = %delegation.validator_address,
                "Validator has no delegator shares, skipping delegation"
            );
            balances.skipped += 1;
            continue;
        }

        let staked = validator.tokens_for_shares(&delegation.shares)?;
        debug!(
            delegator = %delegation.delegator_address,
            validator = %delegation.validator_address,
            shares = %delegation.shares,
            staked = %staked,
            "Converted delegation"
        );
        balances.credit(&delegation.delegator_address, staked);
    }

    info!(
        delegators = balances.len(),
        delegations = staking.delegations.len(),
        skipped = balances.skipped,
        "Aggregated staked balances"
    );
    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator(operator: &str, tokens: &str, shares: &str) -> serde_json::Value {
        json!({
            "operator_address": operator,
            "consensus_pubkey": {
                "@type": "/cosmos.crypto.ed25519.PubKey",
                "key": "5Fujs6ObfVSQPZUXlu/DkO0Lv5yjunyoGjmJzi8Sf8k="
            },
            "status": "BOND_STATUS_BONDED",
            "tokens": tokens,
            "delegator_shares": shares,
            "unbonding_time": "1970-01-01T00:00:00Z",
            "commission": {
                "commission_rates": {
                    "rate": "0.1",
                    "max_rate": "0.2",
                    "max_change_rate": "0.01"
                },
                "update_time": "1970-01-01T00:00:00Z"
            },
            "min_self_delegation": "1"
        })
    }

    fn delegation(delegator: &str, validator: &str, shares: &str) -> serde_json::Value {
        json!({
            "delegator_address": delegator,
            "validator_address": validator,
            "shares": shares
        })
    }

    fn staking(validators: Vec<serde_json::Value>, delegations: Vec<serde_json::Value>) -> StakingGenesis {
        serde_json::from_value(json!({
            "validators": validators,
            "delegations": delegations
        }))
        .unwrap()
    }

    #[test]
    fn test_single_delegation() {
        let staking = staking(
            vec![validator("val1", "1000000", "1000000")],
            vec![delegation("alice", "val1", "500000")],
        );
        let balances = aggregate_staked_balances(&staking).unwrap();
        assert_eq!(balances.get("alice"), Some(&Int::new(500_000)));
        assert_eq!(balances.skipped(), 0);
    }

    #[test]
    fn test_exchange_rate_applied() {
        // Slashed validator: 900 tokens back 1000 shares
        let staking = staking(
            vec![validator("val1", "900", "1000")],
            vec![delegation("alice", "val1", "100")],
        );
        let balances = aggregate_staked_balances(&staking).unwrap();
        assert_eq!(balances.get("alice"), Some(&Int::new(90)));
    }

    #[test]
    fn test_sums_across_validators_in_first_seen_order() {
        let staking = staking(
            vec![
                validator("val1", "1000", "1000"),
                validator("val2", "2000", "1000"),
            ],
            vec![
                delegation("bob", "val1", "10"),
                delegation("alice", "val1", "5"),
                delegation("bob", "val2", "10"),
            ],
        );
        let balances = aggregate_staked_balances(&staking).unwrap();
        let order: Vec<&str> = balances.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(order, vec!["bob", "alice"]);
        assert_eq!(balances.get("bob"), Some(&Int::new(30)));
        assert_eq!(balances.total(), Int::new(35));
    }

    #[test]
    fn test_unknown_and_empty_validators_are_skipped() {
        let staking = staking(
            vec![validator("val1", "0", "0")],
            vec![
                delegation("alice", "val1", "10"),
                delegation("bob", "ghost", "10"),
            ],
        );
        let balances = aggregate_staked_balances(&staking).unwrap();
        assert!(balances.is_empty());
        assert_eq!(balances.skipped(), 2);
    }

    #[test]
    fn test_duplicate_operator_last_wins() {
        let staking = staking(
            vec![
                validator("val1", "1000", "1000"),
                validator("val1", "500", "1000"),
            ],
            vec![delegation("alice", "val1", "100")],
        );
        let balances = aggregate_staked_balances(&staking).unwrap();
        assert_eq!(balances.get("alice"), Some(&Int::new(50)));
    }

    #[test]
    fn test_total_matches_per_validator_sums() {
        let staking = staking(
            vec![
                validator("val1", "3000", "2000"),
                validator("val2", "777", "1000"),
            ],
            vec![
                delegation("a", "val1", "1000"),
                delegation("b", "val1", "1000"),
                delegation("a", "val2", "400"),
                delegation("c", "val2", "600"),
            ],
        );
        let balances = aggregate_staked_balances(&staking).unwrap();

        let per_validator: Int = staking
            .delegations
            .iter()
            .map(|d| {
                let v = staking
                    .validators
                    .iter()
                    .find(|v| v.operator_address == d.validator_address)
                    .unwrap();
                v.tokens_for_shares(&d.shares).unwrap()
            })
            .sum();
        assert_eq!(balances.total(), per_validator);
    }
}
