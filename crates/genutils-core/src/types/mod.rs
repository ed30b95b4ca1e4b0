pub mod account;
pub mod bank;
pub mod coin;
pub mod distribution;
pub mod staking;

pub use account::{
    sanitize_accounts, AuthGenesis, BaseAccount, BaseVestingAccount, GenesisAccount,
    ModuleAccount, VestingAccount,
};
pub use bank::{Balance, BankGenesis};
pub use coin::{Coin, Coins};
pub use distribution::{DelegatorStartingInfo, DelegatorStartingInfoRecord, DistributionGenesis};
pub use staking::{
    BondStatus, Commission, CommissionRates, Delegation, Description, NewValidator,
    StakingGenesis, Validator, BONDED_POOL_NAME, NOT_BONDED_POOL_NAME,
};
