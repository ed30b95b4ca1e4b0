use std::fs;
use std::path::Path;
use tracing::info;

use genutils_core::StakingGenesis;
use genutils_state::GenesisDoc;

use crate::chain::ChainParams;
use crate::error::OpsError;
use crate::snapshot::{
    aggregate_staked_balances, rank_staked_accounts, write_snapshot_csv, SnapshotParams,
};
use crate::upgrade::{synthesize_upgrade, UpgradeConstants, UpgradeModules, UpgradeParams, UpgradeReport};

/// Outcome of a staked-balance export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSummary {
    /// Rows written
    pub accounts: usize,
    /// Delegators seen before filtering
    pub delegators: usize,
    /// Delegations left out of aggregation
    pub skipped_delegations: usize,
}

/// Read a genesis file and write the staked-balance snapshot of its
/// delegators as CSV. The output is only created once the whole snapshot
/// has been computed.
pub fn export_staked_balances<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    chain: &ChainParams,
    params: &SnapshotParams,
) -> Result<SnapshotSummary, OpsError> {
    let doc = GenesisDoc::load(input)?;
    let staking: StakingGenesis = doc.app_state.decode()?;

    let balances = aggregate_staked_balances(&staking)?;
    let ranked = rank_staked_accounts(&balances, &chain.bond_denom, params)?;

    let mut csv = Vec::new();
    write_snapshot_csv(&mut csv, &ranked)?;
    fs::write(output.as_ref(), csv)?;

    info!(
        path = %output.as_ref().display(),
        accounts = ranked.len(),
        "Wrote staked-balance snapshot"
    );
    Ok(SnapshotSummary {
        accounts: ranked.len(),
        delegators: balances.len(),
        skipped_delegations: balances.skipped(),
    })
}

/// Read a genesis file, install the new validator set and write the result.
/// Nothing is written if any step fails.
pub fn export_upgraded_genesis<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    params: &UpgradeParams,
    chain: &ChainParams,
    constants: &UpgradeConstants,
) -> Result<UpgradeReport, OpsError> {
    let mut doc = GenesisDoc::load(input)?;
    let modules = UpgradeModules::decode(&doc.app_state)?;

    let (modules, report) = synthesize_upgrade(modules, params, chain, constants)?;
    modules.encode(&mut doc.app_state)?;
    doc.write(output)?;

    Ok(report)
}
