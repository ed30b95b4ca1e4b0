use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Convert to a JSON value. Object keys come out sorted, which is what makes
/// every encoding below canonical.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value, CoreError> {
    serde_json::to_value(value).map_err(|e| CoreError::Serialization(e.to_string()))
}

/// Deserialize from a JSON value
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::Deserialization(e.to_string()))
}

/// Serialize to a compact JSON string with sorted keys
pub fn to_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    let value = to_value(value)?;
    serde_json::to_string(&value).map_err(|e| CoreError::Serialization(e.to_string()))
}

/// Serialize to a pretty JSON string with sorted keys
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, CoreError> {
    let value = to_value(value)?;
    serde_json::to_string_pretty(&value).map_err(|e| CoreError::Serialization(e.to_string()))
}

/// Deserialize from JSON string
pub fn from_json<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T, CoreError> {
    serde_json::from_str(json).map_err(|e| CoreError::Deserialization(e.to_string()))
}

/// Deserialize from JSON bytes
pub fn from_json_bytes<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, CoreError> {
    serde_json::from_slice(bytes).map_err(|e| CoreError::Deserialization(e.to_string()))
}

/// `u64` carried as a decimal string, the way protobuf JSON renders 64-bit
/// integers. Bare JSON numbers are accepted on input.
pub mod u64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    pub fn serialize<S>(value: &u64, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(de: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StringOrNumber::deserialize(de)? {
            StringOrNumber::String(s) => s.parse().map_err(de::Error::custom),
            StringOrNumber::Number(n) => Ok(n),
        }
    }
}
