use serde::{de::DeserializeOwned, Serialize};

use genutils_core::{AuthGenesis, BankGenesis, DistributionGenesis, StakingGenesis};

/// A module state stored under a fixed key of `app_state`
pub trait ModuleGenesis: Serialize + DeserializeOwned {
    const MODULE: &'static str;
}

impl ModuleGenesis for AuthGenesis {
    const MODULE: &'static str = "auth";
}

impl ModuleGenesis for BankGenesis {
    const MODULE: &'static str = "bank";
}

impl ModuleGenesis for StakingGenesis {
    const MODULE: &'static str = "staking";
}

impl ModuleGenesis for DistributionGenesis {
    const MODULE: &'static str = "distribution";
}
