use sha2::{Digest, Sha256};

/// Length of an address derived by truncating a hash
pub const ADDRESS_LEN: usize = 20;

/// Compute SHA-256 of data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First 20 bytes of SHA-256, the address scheme used for module accounts
/// and ed25519 consensus keys
pub fn truncated_sha256(data: &[u8]) -> [u8; ADDRESS_LEN] {
    let digest = sha256(data);
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&digest[..ADDRESS_LEN]);
    out
}
