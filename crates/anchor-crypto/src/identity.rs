use anchor_types::{Address, NetworkType, PublicKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// Deterministic public key for an application asset.
///
/// SHA3-256 over `source ++ identifier` (UTF-8, no separator). Other
/// implementations verify assets by recomputing this, so neither the
/// algorithm nor the input layout may change.
pub fn derive_public_key(source: &str, identifier: &str) -> PublicKey {
    let mut hasher = Sha3_256::new();
    hasher.update(source.as_bytes());
    hasher.update(identifier.as_bytes());
    PublicKey::from_bytes(hasher.finalize().into())
}

/// Address of a public key on `network`.
pub fn derive_address(public_key: &PublicKey, network: NetworkType) -> Address {
    Address::from_public_key(public_key, network)
}

/// The ledger identity of an asset.
///
/// A pure function of `(source, identifier, network)`: the same inputs
/// always produce the same key and address, which is what lets a reader
/// detect a definition record that does not belong at an address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetIdentity {
    pub source: String,
    pub identifier: String,
    pub public_key: PublicKey,
    pub address: Address,
}

impl AssetIdentity {
    pub fn derive(source: &str, identifier: &str, network: NetworkType) -> Self {
        let public_key = derive_public_key(source, identifier);
        Self {
            source: source.to_string(),
            identifier: identifier.to_string(),
            address: derive_address(&public_key, network),
            public_key,
        }
    }

    pub fn network(&self) -> NetworkType {
        self.address.network()
    }
}
