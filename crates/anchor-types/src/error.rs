use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("unknown network identifier: {0:#04x}")]
    UnknownNetwork(u8),

    #[error("{key} contains the reserved character {character:?}")]
    ReservedCharacter { key: String, character: char },

    #[error("{key} holds a non-finite number")]
    NonFiniteNumber { key: String },
}
