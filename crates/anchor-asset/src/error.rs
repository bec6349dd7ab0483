use anchor_codec::CodecError;
use anchor_types::TypeError;

/// Errors produced by asset construction and command handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("validation failed: {0}")]
    Validation(#[from] TypeError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("evidence not present")]
    EvidenceNotPresent,
}

pub type AssetResult<T> = Result<T, AssetError>;
