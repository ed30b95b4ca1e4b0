use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Invalid integer: {0}")]
    InvalidInt(String),

    #[error("Invalid decimal: {0}")]
    InvalidDec(String),

    #[error("Supply mismatch: balances sum to {balances}, supply is {supply}")]
    SupplyMismatch { balances: String, supply: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

impl CoreError {
    pub fn invalid_address(address: &str, reason: impl ToString) -> Self {
        CoreError::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}
