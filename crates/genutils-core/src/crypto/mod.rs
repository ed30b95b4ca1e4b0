pub mod address;
pub mod hash;
pub mod keys;

pub use address::{Address, Bech32Prefixes};
pub use hash::{sha256, truncated_sha256};
pub use keys::PubKey;
