use serde::{Deserialize, Serialize};

use genutils_core::Bech32Prefixes;

/// Chain-wide naming shared by every transformation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    pub prefixes: Bech32Prefixes,
    pub bond_denom: String,
}

impl Default for ChainParams {
    fn default() -> Self {
        ChainParams {
            prefixes: Bech32Prefixes::default(),
            bond_denom: "ubtsg".to_string(),
        }
    }
}
