//! Staked-balance snapshot: aggregate delegations per delegator, keep the
//! large holders, value them and write the result as CSV.

pub mod aggregate;
pub mod rank;
pub mod report;

pub use aggregate::{aggregate_staked_balances, DerivedAccount, StakedBalances};
pub use rank::{rank_staked_accounts, AssetInfo, SnapshotParams, StakedAccount};
pub use report::{write_snapshot_csv, CSV_HEADER};
