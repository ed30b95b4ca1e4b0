use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use genutils_core::{Dec, Int};

use crate::error::OpsError;
use crate::snapshot::aggregate::StakedBalances;

/// Display information and reference price of a denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Display denomination, e.g. `btsg`
    pub display: String,
    /// Base units per display unit, as a power of ten
    pub decimals: u32,
    /// Price of one display unit in USD
    pub price: Dec,
}

/// Snapshot selection and valuation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotParams {
    /// Smallest staked amount, in base units, that makes it into the snapshot
    pub min_staked: Int,
    /// Asset table keyed by base denomination
    pub assets: BTreeMap<String, AssetInfo>,
}

impl Default for SnapshotParams {
    fn default() -> Self {
        let mut assets = BTreeMap::new();
        assets.insert(
            "ubtsg".to_string(),
            AssetInfo {
                display: "btsg".to_string(),
                decimals: 6,
                price: Dec::from_bps(1251),
            },
        );

        SnapshotParams {
            min_staked: Int::new(400_000_000),
            assets,
        }
    }
}

/// One row of the staked-balance snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakedAccount {
    pub address: String,
    pub staked: Int,
    pub usd_value: Int,
}

/// `round(price * amount / 10^decimals)`
fn usd_value(asset: &AssetInfo, amount: &Int) -> Result<Int, OpsError> {
    let unit = Dec::from_int(&Int::new(10)).power(asset.decimals);
    Ok(asset.price.mul(&amount.to_dec()).quo(&unit)?.round_int())
}

/// Keep delegators holding at least `min_staked`, value them in USD and
/// order them by stake, largest first. Equal stakes keep aggregation order.
pub fn rank_staked_accounts(
    balances: &StakedBalances,
    bond_denom: &str,
    params: &SnapshotParams,
) -> Result<Vec<StakedAccount>, OpsError> {
    let asset = params
        .assets
        .get(bond_denom)
        .ok_or_else(|| OpsError::UnknownAsset(bond_denom.to_string()))?;

    let mut ranked = balances
        .iter()
        .filter(|account| account.staked >= params.min_staked)
        .map(|account| {
            Ok(StakedAccount {
                address: account.address.clone(),
                usd_value: usd_value(asset, &account.staked)?,
                staked: account.staked.clone(),
            })
        })
        .collect::<Result<Vec<_>, OpsError>>()?;

    ranked.sort_by(|a, b| b.staked.cmp(&a.staked));

    info!(
        kept = ranked.len(),
        delegators = balances.len(),
        min_staked = %params.min_staked,
        asset = %asset.display,
        "Ranked staked accounts"
    );
    Ok(ranked)
}
