use anchor_types::Hash256;
use serde::Serialize;
use sha3::{Digest, Sha3_256};

const TRANSACTION_DOMAIN: &[u8] = b"anchor-transaction-v1:";

/// Content hash of a sealed transaction.
///
/// SHA3-256 over a domain tag followed by the JSON form of `value`. The tag
/// keeps these hashes apart from asset public keys, which are plain SHA3-256
/// over application data.
pub fn transaction_hash<T: Serialize>(value: &T) -> Result<Hash256, HasherError> {
    let data = serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
    let mut hasher = Sha3_256::new();
    hasher.update(TRANSACTION_DOMAIN);
    hasher.update(&data);
    Ok(Hash256::from_bytes(hasher.finalize().into()))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
