use std::path::Path;

use anyhow::Result;
use genutils_ops::{ChainParams, SnapshotParams, UpgradeConstants};
use serde::{Deserialize, Serialize};

/// Tool configuration. Every section falls back to the compiled defaults
/// when left out of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenutilsConfig {
    /// Address prefixes and bond denomination
    pub chain: ChainParams,

    /// Staked-balance snapshot threshold and asset table
    pub snapshot: SnapshotParams,

    /// Funding, commission and naming of upgraded validators
    pub upgrade: UpgradeConstants,
}

impl GenutilsConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GenutilsConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Sample configuration written by `init-config`
pub fn generate_sample_config() -> GenutilsConfig {
    GenutilsConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use genutils_core::Int;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = GenutilsConfig::default();
        assert_eq!(config.chain.bond_denom, "ubtsg");
        assert_eq!(config.chain.prefixes.validator, "bitsongvaloper");
        assert_eq!(config.snapshot.min_staked, Int::new(400_000_000));
        assert_eq!(config.upgrade.funding_amount, Int::new(1_000_000_000));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("genutils.json");
        let config = generate_sample_config();
        config.save(&path).unwrap();
        assert_eq!(GenutilsConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("genutils.json");
        std::fs::write(
            &path,
            r#"{"chain": {"prefixes": {"account": "cosmos", "validator": "cosmosvaloper", "consensus": "cosmosvalcons"}, "bond_denom": "uatom"}}"#,
        )
        .unwrap();

        let config = GenutilsConfig::load(&path).unwrap();
        assert_eq!(config.chain.bond_denom, "uatom");
        assert_eq!(config.snapshot, SnapshotParams::default());
    }
}
