use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::hash::truncated_sha256;
use crate::error::CoreError;

/// Longest address payload the ledger accepts
pub const MAX_ADDRESS_LEN: usize = 255;

/// Human readable parts used to render the three address kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bech32Prefixes {
    /// Accounts, e.g. `bitsong1...`
    pub account: String,
    /// Validator operators, e.g. `bitsongvaloper1...`
    pub validator: String,
    /// Consensus nodes, e.g. `bitsongvalcons1...`
    pub consensus: String,
}

impl Default for Bech32Prefixes {
    fn default() -> Self {
        Bech32Prefixes {
            account: "bitsong".to_string(),
            validator: "bitsongvaloper".to_string(),
            consensus: "bitsongvalcons".to_string(),
        }
    }
}

/// Raw address bytes, independent of how they are rendered
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(Vec<u8>);

impl Address {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.is_empty() || bytes.len() > MAX_ADDRESS_LEN {
            return Err(CoreError::invalid_address(
                &hex::encode(bytes),
                format!("address length {} out of range", bytes.len()),
            ));
        }
        Ok(Address(bytes.to_vec()))
    }

    /// Address of a module account: first 20 bytes of SHA-256 of its name
    pub fn module(name: &str) -> Self {
        Address(truncated_sha256(name.as_bytes()).to_vec())
    }

    /// Decode a bech32 string, requiring the given human readable part
    pub fn from_bech32(s: &str, expected_hrp: &str) -> Result<Self, CoreError> {
        let (hrp, data, variant) =
            bech32::decode(s).map_err(|e| CoreError::invalid_address(s, e))?;

        if variant != Variant::Bech32 {
            return Err(CoreError::invalid_address(s, "expected bech32 variant"));
        }
        if hrp != expected_hrp {
            return Err(CoreError::invalid_address(
                s,
                format!("expected prefix {}, got {}", expected_hrp, hrp),
            ));
        }

        let bytes = Vec::<u8>::from_base32(&data).map_err(|e| CoreError::invalid_address(s, e))?;
        Self::from_bytes(&bytes).map_err(|_| {
            CoreError::invalid_address(s, format!("address length {} out of range", bytes.len()))
        })
    }

    pub fn to_bech32(&self, hrp: &str) -> Result<String, CoreError> {
        bech32::encode(hrp, self.0.to_base32(), Variant::Bech32)
            .map_err(|e| CoreError::invalid_address(&self.to_hex(), e))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}
