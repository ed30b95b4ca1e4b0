use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::serialize::{self, u64_string};
use crate::types::coin::Coins;

pub const BASE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.BaseAccount";
pub const MODULE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.ModuleAccount";
pub const CONTINUOUS_VESTING_TYPE_URL: &str = "/cosmos.vesting.v1beta1.ContinuousVestingAccount";
pub const DELAYED_VESTING_TYPE_URL: &str = "/cosmos.vesting.v1beta1.DelayedVestingAccount";
pub const PERIODIC_VESTING_TYPE_URL: &str = "/cosmos.vesting.v1beta1.PeriodicVestingAccount";
pub const PERMANENT_LOCKED_TYPE_URL: &str = "/cosmos.vesting.v1beta1.PermanentLockedAccount";

const KNOWN_ACCOUNT_TYPES: [&str; 6] = [
    BASE_ACCOUNT_TYPE_URL,
    MODULE_ACCOUNT_TYPE_URL,
    CONTINUOUS_VESTING_TYPE_URL,
    DELAYED_VESTING_TYPE_URL,
    PERIODIC_VESTING_TYPE_URL,
    PERMANENT_LOCKED_TYPE_URL,
];

/// Fields shared by every account kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAccount {
    pub address: String,
    /// Packed public key; `null` until the account signs its first tx
    pub pub_key: Option<Value>,
    #[serde(with = "u64_string")]
    pub account_number: u64,
    #[serde(with = "u64_string")]
    pub sequence: u64,
}

impl BaseAccount {
    pub fn new(address: &str, pub_key: Option<Value>, account_number: u64, sequence: u64) -> Self {
        BaseAccount {
            address: address.to_string(),
            pub_key,
            account_number,
            sequence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleAccount {
    pub base_account: BaseAccount,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseVestingAccount {
    pub base_account: BaseAccount,
    #[serde(default)]
    pub original_vesting: Coins,
    #[serde(default)]
    pub delegated_free: Coins,
    #[serde(default)]
    pub delegated_vesting: Coins,
    /// `end_time` and anything else the schema adds
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Any vesting account; the schedule-specific fields (`start_time`,
/// `vesting_periods`) are carried opaquely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingAccount {
    pub base_vesting_account: BaseVestingAccount,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// An account resolved from its packed `Any` form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum GenesisAccount {
    #[serde(rename = "/cosmos.auth.v1beta1.BaseAccount")]
    Base(BaseAccount),
    #[serde(rename = "/cosmos.auth.v1beta1.ModuleAccount")]
    Module(ModuleAccount),
    #[serde(rename = "/cosmos.vesting.v1beta1.ContinuousVestingAccount")]
    ContinuousVesting(VestingAccount),
    #[serde(rename = "/cosmos.vesting.v1beta1.DelayedVestingAccount")]
    DelayedVesting(VestingAccount),
    #[serde(rename = "/cosmos.vesting.v1beta1.PeriodicVestingAccount")]
    PeriodicVesting(VestingAccount),
    #[serde(rename = "/cosmos.vesting.v1beta1.PermanentLockedAccount")]
    PermanentLocked(VestingAccount),
}

impl GenesisAccount {
    /// Resolve a packed account. Unknown or missing `@type` tags are rejected.
    pub fn from_any(value: Value) -> Result<Self, CoreError> {
        let type_url = value
            .get("@type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::UnsupportedType("account without @type".to_string()))?;

        if !KNOWN_ACCOUNT_TYPES.contains(&type_url) {
            return Err(CoreError::UnsupportedType(format!(
                "account type {}",
                type_url
            )));
        }

        serialize::from_value(value)
    }

    pub fn to_any(&self) -> Result<Value, CoreError> {
        serialize::to_value(self)
    }

    pub fn base_account(&self) -> &BaseAccount {
        match self {
            GenesisAccount::Base(base) => base,
            GenesisAccount::Module(module) => &module.base_account,
            GenesisAccount::ContinuousVesting(vesting)
            | GenesisAccount::DelayedVesting(vesting)
            | GenesisAccount::PeriodicVesting(vesting)
            | GenesisAccount::PermanentLocked(vesting) => &vesting.base_vesting_account.base_account,
        }
    }

    pub fn address(&self) -> &str {
        &self.base_account().address
    }

    pub fn account_number(&self) -> u64 {
        self.base_account().account_number
    }
}

/// Order accounts by account number, keeping input order among equals
pub fn sanitize_accounts(accounts: &mut [GenesisAccount]) {
    accounts.sort_by_key(GenesisAccount::account_number);
}

/// `auth` module genesis state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthGenesis {
    /// Packed accounts; use [`AuthGenesis::unpack_accounts`] to resolve them
    #[serde(default)]
    pub accounts: Vec<Value>,
    /// `params` and anything else the schema adds
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AuthGenesis {
    pub fn unpack_accounts(&self) -> Result<Vec<GenesisAccount>, CoreError> {
        self.accounts
            .iter()
            .cloned()
            .map(GenesisAccount::from_any)
            .collect()
    }

    pub fn pack_accounts(&mut self, accounts: &[GenesisAccount]) -> Result<(), CoreError> {
        self.accounts = accounts
            .iter()
            .map(GenesisAccount::to_any)
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}
