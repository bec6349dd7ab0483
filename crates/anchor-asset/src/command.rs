use anchor_codec::{CodecError, CommandDescriptor, RecordKind};
use anchor_types::{Evidence, NetworkType, PublicAccount};
use serde::Serialize;
use tracing::debug;

use crate::asset::Asset;
use crate::error::{AssetError, AssetResult};

/// A domain operation applied to an [`Asset`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetCommand {
    /// Replace the owner of the asset.
    TransferOwnership {
        new_owner: PublicAccount,
        evidence: Option<Evidence>,
    },
}

impl AssetCommand {
    /// A locally built, unpersisted ownership transfer.
    pub fn transfer_ownership(new_owner: PublicAccount) -> Self {
        Self::TransferOwnership {
            new_owner,
            evidence: None,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.descriptor().kind()
    }

    pub fn descriptor(&self) -> CommandDescriptor {
        match self {
            Self::TransferOwnership { new_owner, .. } => CommandDescriptor::TransferOwnership {
                new_owner: new_owner.public_key,
            },
        }
    }

    /// Fold this command into `asset`, returning the resulting asset.
    pub fn apply(&self, asset: &Asset) -> Asset {
        match self {
            Self::TransferOwnership { new_owner, .. } => asset.with_applied(*new_owner, self.clone()),
        }
    }

    /// Descriptor text as written to the ledger.
    pub fn to_dto(&self) -> String {
        self.descriptor().encode()
    }

    pub fn is_persisted(&self) -> bool {
        self.evidence_ref().is_some()
    }

    /// Where the command was found on the ledger.
    pub fn evidence(&self) -> AssetResult<&Evidence> {
        self.evidence_ref().ok_or(AssetError::EvidenceNotPresent)
    }

    /// Mark the command as observed on the ledger.
    pub fn with_evidence(self, evidence: Evidence) -> Self {
        match self {
            Self::TransferOwnership { new_owner, .. } => Self::TransferOwnership {
                new_owner,
                evidence: Some(evidence),
            },
        }
    }

    /// Parse descriptor text into an unpersisted command.
    ///
    /// Accounts in the result are addressed on `network`.
    pub fn from_descriptor(text: &str, network: NetworkType) -> AssetResult<Self> {
        match CommandDescriptor::decode(text)? {
            CommandDescriptor::TransferOwnership { new_owner } => {
                Ok(Self::transfer_ownership(PublicAccount::new(new_owner, network)))
            }
        }
    }

    /// Decode descriptor text and apply it to `asset`.
    ///
    /// The text is checked before anything is built, so a malformed
    /// descriptor leaves no trace.
    pub fn read_and_apply(text: &str, asset: &Asset) -> AssetResult<Asset> {
        if !CommandDescriptor::is_command(text) {
            return Err(CodecError::MalformedRecord(text.to_string()).into());
        }
        let command = Self::from_descriptor(text, asset.network())?;
        debug!(kind = command.kind().name(), "applying command from descriptor");
        Ok(command.apply(asset))
    }

    fn evidence_ref(&self) -> Option<&Evidence> {
        match self {
            Self::TransferOwnership { evidence, .. } => evidence.as_ref(),
        }
    }
}
