use std::fmt;

use ripemd::Ripemd160;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};

use crate::base32;
use crate::error::TypeError;
use crate::hash::decode_32;
use crate::network::NetworkType;

/// A 32-byte account public key.
///
/// Accepted as 64 hex characters in either case; always rendered as
/// uppercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Length of the hex text form.
    pub const HEX_LEN: usize = 64;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from exactly 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        decode_32(s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Uppercase hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(de::Error::custom)
    }
}

/// Network-qualified account address.
///
/// Decoded layout (25 bytes):
///
/// ```text
/// +-----------+--------------------------------+----------+
/// | network   | RIPEMD-160(SHA3-256(pubkey))   | checksum |
/// | (1 byte)  | (20 bytes)                     | (4 bytes)|
/// +-----------+--------------------------------+----------+
/// ```
///
/// The checksum is the first four bytes of SHA3-256 over the first 21 bytes.
/// The text form is the base32 encoding of all 25 bytes (40 characters).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; Self::DECODED_LEN],
    network: NetworkType,
}

impl Address {
    pub const DECODED_LEN: usize = 25;
    pub const ENCODED_LEN: usize = 40;
    const CHECKSUM_LEN: usize = 4;
    const BODY_LEN: usize = Self::DECODED_LEN - Self::CHECKSUM_LEN;

    /// Derive the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        let key_hash = Sha3_256::digest(public_key.as_bytes());
        let ripemd_hash = Ripemd160::digest(key_hash);

        let mut bytes = [0u8; Self::DECODED_LEN];
        bytes[0] = network.identifier();
        bytes[1..Self::BODY_LEN].copy_from_slice(&ripemd_hash);
        let checksum = Sha3_256::digest(&bytes[..Self::BODY_LEN]);
        bytes[Self::BODY_LEN..].copy_from_slice(&checksum[..Self::CHECKSUM_LEN]);

        Self { bytes, network }
    }

    /// Parse a plain (`SAG3VK...`) or pretty (`SAG3VK-H4XRCV-...`) address.
    ///
    /// Validates the alphabet, length, network byte, and checksum.
    pub fn from_raw(text: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidAddress {
            address: text.to_string(),
            reason: reason.to_string(),
        };

        let normalized = text.trim().replace('-', "").to_ascii_uppercase();
        if normalized.len() != Self::ENCODED_LEN {
            return Err(invalid("expected 40 base32 characters"));
        }
        let decoded = base32::decode(&normalized).ok_or_else(|| invalid("not base32"))?;
        if decoded.len() != Self::DECODED_LEN {
            return Err(invalid("decoded length mismatch"));
        }

        let network = NetworkType::from_identifier(decoded[0])?;
        let checksum = Sha3_256::digest(&decoded[..Self::BODY_LEN]);
        if checksum[..Self::CHECKSUM_LEN] != decoded[Self::BODY_LEN..] {
            return Err(invalid("checksum mismatch"));
        }

        let mut bytes = [0u8; Self::DECODED_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes, network })
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn as_bytes(&self) -> &[u8; Self::DECODED_LEN] {
        &self.bytes
    }

    /// The 40-character text form.
    pub fn plain(&self) -> String {
        base32::encode(&self.bytes)
    }

    /// The text form grouped in blocks of six, separated by `-`.
    pub fn pretty(&self) -> String {
        let plain = self.plain();
        plain
            .as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.plain())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_raw(&text).map_err(de::Error::custom)
    }
}

/// A public key together with the address it controls on one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicAccount {
    pub public_key: PublicKey,
    pub address: Address,
}

impl PublicAccount {
    pub fn new(public_key: PublicKey, network: NetworkType) -> Self {
        Self {
            public_key,
            address: Address::from_public_key(&public_key, network),
        }
    }

    /// Build an account from a hex public key. Fails on malformed hex.
    pub fn from_public_key(hex: &str, network: NetworkType) -> Result<Self, TypeError> {
        Ok(Self::new(PublicKey::from_hex(hex)?, network))
    }

    pub fn network(&self) -> NetworkType {
        self.address.network()
    }
}
