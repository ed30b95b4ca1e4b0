use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::crypto::PubKey;
use crate::error::CoreError;
use crate::math::{Dec, Int};
use crate::serialize::u64_string;

/// Name of the module account holding bonded stake
pub const BONDED_POOL_NAME: &str = "bonded_tokens_pool";
/// Name of the module account holding unbonded and unbonding stake
pub const NOT_BONDED_POOL_NAME: &str = "not_bonded_tokens_pool";

/// Zero value of a protobuf timestamp
pub const ZERO_TIME: &str = "0001-01-01T00:00:00Z";
/// Unix epoch, used as the commission update time of new validators
pub const UNIX_EPOCH_TIME: &str = "1970-01-01T00:00:00Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondStatus {
    #[serde(rename = "BOND_STATUS_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "BOND_STATUS_UNBONDED")]
    Unbonded,
    #[serde(rename = "BOND_STATUS_UNBONDING")]
    Unbonding,
    #[serde(rename = "BOND_STATUS_BONDED")]
    Bonded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub moniker: String,
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub security_contact: String,
    #[serde(default)]
    pub details: String,
}

impl Description {
    pub fn with_moniker(moniker: &str) -> Self {
        Description {
            moniker: moniker.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub rate: Dec,
    pub max_rate: Dec,
    pub max_change_rate: Dec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub commission_rates: CommissionRates,
    pub update_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub operator_address: String,
    /// Packed consensus key, kept opaque so that exotic key types in existing
    /// state do not block decoding
    pub consensus_pubkey: Value,
    #[serde(default)]
    pub jailed: bool,
    pub status: BondStatus,
    pub tokens: Int,
    pub delegator_shares: Dec,
    #[serde(default)]
    pub description: Description,
    #[serde(with = "u64_string", default)]
    pub unbonding_height: u64,
    pub unbonding_time: String,
    pub commission: Commission,
    pub min_self_delegation: Int,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Everything needed to create a validator at genesis
#[derive(Debug, Clone)]
pub struct NewValidator<'a> {
    pub operator_address: &'a str,
    pub consensus_pubkey: &'a PubKey,
    pub status: BondStatus,
    pub tokens: Int,
    pub moniker: &'a str,
    pub commission_rates: CommissionRates,
    pub min_self_delegation: Int,
}

impl Validator {
    /// A validator whose shares equal its tokens, i.e. exchange rate one
    pub fn new_genesis(params: NewValidator<'_>) -> Self {
        Validator {
            operator_address: params.operator_address.to_string(),
            consensus_pubkey: params.consensus_pubkey.to_any(),
            jailed: false,
            status: params.status,
            delegator_shares: params.tokens.to_dec(),
            tokens: params.tokens,
            description: Description::with_moniker(params.moniker),
            unbonding_height: 0,
            unbonding_time: ZERO_TIME.to_string(),
            commission: Commission {
                commission_rates: params.commission_rates,
                update_time: UNIX_EPOCH_TIME.to_string(),
            },
            min_self_delegation: params.min_self_delegation,
            extra: BTreeMap::new(),
        }
    }

    /// Token value of `shares`: `round(shares * tokens / delegator_shares)`
    pub fn tokens_for_shares(&self, shares: &Dec) -> Result<Int, CoreError> {
        Ok(shares
            .mul_int(&self.tokens)
            .quo(&self.delegator_shares)?
            .round_int())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator_address: String,
    pub validator_address: String,
    pub shares: Dec,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Delegation {
    pub fn new(delegator_address: &str, validator_address: &str, shares: Dec) -> Self {
        Delegation {
            delegator_address: delegator_address.to_string(),
            validator_address: validator_address.to_string(),
            shares,
            extra: BTreeMap::new(),
        }
    }
}

/// `staking` module genesis state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingGenesis {
    #[serde(default)]
    pub last_total_power: Int,
    #[serde(default)]
    pub last_validator_powers: Vec<Value>,
    #[serde(default)]
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub delegations: Vec<Delegation>,
    #[serde(default)]
    pub unbonding_delegations: Vec<Value>,
    #[serde(default)]
    pub redelegations: Vec<Value>,
    #[serde(default)]
    pub exported: bool,
    /// `params` and anything else the schema adds
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
