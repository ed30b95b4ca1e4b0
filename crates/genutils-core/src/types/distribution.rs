use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::math::Dec;
use crate::serialize::u64_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorStartingInfo {
    #[serde(with = "u64_string")]
    pub previous_period: u64,
    pub stake: Dec,
    #[serde(with = "u64_string")]
    pub height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorStartingInfoRecord {
    pub delegator_address: String,
    pub validator_address: String,
    pub starting_info: DelegatorStartingInfo,
}

impl DelegatorStartingInfoRecord {
    /// Starting info of a delegation created at genesis: height 0, period 1
    pub fn at_genesis(delegator_address: &str, validator_address: &str, stake: Dec) -> Self {
        DelegatorStartingInfoRecord {
            delegator_address: delegator_address.to_string(),
            validator_address: validator_address.to_string(),
            starting_info: DelegatorStartingInfo {
                previous_period: 1,
                stake,
                height: 0,
            },
        }
    }
}

/// `distribution` module genesis state.
///
/// Only the starting infos are typed; the other reward collections are only
/// ever carried or cleared, never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionGenesis {
    #[serde(default)]
    pub delegator_withdraw_infos: Vec<Value>,
    #[serde(default)]
    pub previous_proposer: String,
    #[serde(default)]
    pub outstanding_rewards: Vec<Value>,
    #[serde(default)]
    pub validator_accumulated_commissions: Vec<Value>,
    #[serde(default)]
    pub validator_historical_rewards: Vec<Value>,
    #[serde(default)]
    pub validator_current_rewards: Vec<Value>,
    #[serde(default)]
    pub delegator_starting_infos: Vec<DelegatorStartingInfoRecord>,
    #[serde(default)]
    pub validator_slash_events: Vec<Value>,
    /// `params`, `fee_pool` and anything else the schema adds
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DistributionGenesis {
    /// Drop all per-validator and per-delegator reward bookkeeping
    pub fn clear_reward_records(&mut self) {
        self.delegator_withdraw_infos.clear();
        self.outstanding_rewards.clear();
        self.validator_accumulated_commissions.clear();
        self.validator_historical_rewards.clear();
        self.validator_current_rewards.clear();
        self.delegator_starting_infos.clear();
        self.validator_slash_events.clear();
    }
}
