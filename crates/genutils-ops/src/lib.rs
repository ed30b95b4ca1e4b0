//! Genutils Ops - Genesis transformations
//!
//! This crate derives staked-balance snapshots from a genesis state and
//! synthesizes upgraded genesis states with a fresh validator set.

pub mod chain;
pub mod error;
pub mod pipeline;
pub mod snapshot;
pub mod upgrade;

pub use chain::ChainParams;
pub use error::OpsError;
pub use pipeline::{export_staked_balances, export_upgraded_genesis, SnapshotSummary};
pub use snapshot::{
    aggregate_staked_balances, rank_staked_accounts, write_snapshot_csv, AssetInfo,
    DerivedAccount, SnapshotParams, StakedAccount, StakedBalances,
};
pub use upgrade::{
    synthesize_upgrade, UpgradeConstants, UpgradeModules, UpgradeParams, UpgradeReport,
};
