use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::crypto::address::Address;
use crate::crypto::hash::truncated_sha256;
use crate::error::CoreError;

pub const ED25519_TYPE_URL: &str = "/cosmos.crypto.ed25519.PubKey";
pub const SECP256K1_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

const ED25519_KEY_LEN: usize = 32;
const SECP256K1_KEY_LEN: usize = 33;

/// Key bytes carried as standard base64 in JSON
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(de)?;
        STANDARD.decode(s.as_bytes()).map_err(de::Error::custom)
    }
}

/// A public key in its packed `Any` JSON form, e.g.
/// `{"@type":"/cosmos.crypto.ed25519.PubKey","key":"..."}`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum PubKey {
    #[serde(rename = "/cosmos.crypto.ed25519.PubKey")]
    Ed25519 {
        #[serde(with = "base64_bytes")]
        key: Vec<u8>,
    },
    #[serde(rename = "/cosmos.crypto.secp256k1.PubKey")]
    Secp256k1 {
        #[serde(with = "base64_bytes")]
        key: Vec<u8>,
    },
}

impl PubKey {
    /// Parse a packed key from JSON text
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| CoreError::Deserialization(e.to_string()))?;
        Self::from_any(value)
    }

    /// Resolve a packed key, rejecting unknown type URLs
    pub fn from_any(value: Value) -> Result<Self, CoreError> {
        let type_url = value
            .get("@type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::UnsupportedType("public key without @type".to_string()))?;

        if type_url != ED25519_TYPE_URL && type_url != SECP256K1_TYPE_URL {
            return Err(CoreError::UnsupportedType(format!(
                "public key type {}",
                type_url
            )));
        }

        let key: PubKey =
            serde_json::from_value(value).map_err(|e| CoreError::Deserialization(e.to_string()))?;
        key.validate()?;
        Ok(key)
    }

    fn validate(&self) -> Result<(), CoreError> {
        match self {
            PubKey::Ed25519 { key } => {
                let bytes: [u8; ED25519_KEY_LEN] = key.as_slice().try_into().map_err(|_| {
                    CoreError::InvalidPublicKey(format!("ed25519 key has {} bytes", key.len()))
                })?;
                VerifyingKey::from_bytes(&bytes)
                    .map_err(|e| CoreError::InvalidPublicKey(e.to_string()))?;
            }
            PubKey::Secp256k1 { key } => {
                if key.len() != SECP256K1_KEY_LEN {
                    return Err(CoreError::InvalidPublicKey(format!(
                        "secp256k1 key has {} bytes",
                        key.len()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn type_url(&self) -> &'static str {
        match self {
            PubKey::Ed25519 { .. } => ED25519_TYPE_URL,
            PubKey::Secp256k1 { .. } => SECP256K1_TYPE_URL,
        }
    }

    pub fn key_bytes(&self) -> &[u8] {
        match self {
            PubKey::Ed25519 { key } | PubKey::Secp256k1 { key } => key,
        }
    }

    /// Address of the key when used as a consensus key.
    ///
    /// Only ed25519 consensus keys are supported.
    pub fn consensus_address(&self) -> Result<Address, CoreError> {
        match self {
            PubKey::Ed25519 { key } => Address::from_bytes(&truncated_sha256(key)),
            PubKey::Secp256k1 { .. } => Err(CoreError::UnsupportedType(format!(
                "{} as consensus key",
                SECP256K1_TYPE_URL
            ))),
        }
    }

    /// Packed `Any` JSON form
    pub fn to_any(&self) -> Value {
        serde_json::json!({
            "@type": self.type_url(),
            "key": STANDARD.encode(self.key_bytes()),
        })
    }

    /// Generate a fresh random ed25519 key.
    ///
    /// Output built from this key is not reproducible.
    pub fn generate_ed25519() -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        PubKey::Ed25519 {
            key: signing.verifying_key().to_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({}, {})", self.type_url(), hex::encode(self.key_bytes()))
    }
}
