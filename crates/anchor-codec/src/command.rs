use anchor_types::PublicKey;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::record::{RecordKind, TRANSFER_OWNERSHIP_PREFIX};

/// Wire form of an asset command.
///
/// Only the payload travels on the ledger; who sent it and where it landed
/// are read from the carrying transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandDescriptor {
    TransferOwnership { new_owner: PublicKey },
}

impl CommandDescriptor {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::TransferOwnership { .. } => RecordKind::TransferOwnership,
        }
    }

    /// Canonical descriptor text, with the key in uppercase hex.
    pub fn encode(&self) -> String {
        match self {
            Self::TransferOwnership { new_owner } => {
                format!("{TRANSFER_OWNERSHIP_PREFIX}{}", new_owner.to_hex())
            }
        }
    }

    /// Whether `text` is a well-formed command descriptor.
    ///
    /// Hex case is not significant.
    pub fn is_command(text: &str) -> bool {
        text.len() == TRANSFER_OWNERSHIP_PREFIX.len() + PublicKey::HEX_LEN
            && text
                .strip_prefix(TRANSFER_OWNERSHIP_PREFIX)
                .is_some_and(|key| PublicKey::from_hex(key).is_ok())
    }

    pub fn decode(text: &str) -> CodecResult<Self> {
        if !Self::is_command(text) {
            return Err(CodecError::MalformedRecord(text.to_string()));
        }
        let key = &text[TRANSFER_OWNERSHIP_PREFIX.len()..];
        let new_owner =
            PublicKey::from_hex(key).map_err(|_| CodecError::MalformedRecord(text.to_string()))?;
        Ok(Self::TransferOwnership { new_owner })
    }
}
