use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("{address} is not an asset: found {candidates} qualifying bundles, expected 1")]
    NotAnAsset { address: String, candidates: usize },

    #[error("first record is not an asset definition: {0}")]
    InvalidPrefix(String),

    #[error("asset definition does not belong at {expected}: it derives {derived}")]
    IdentityMismatch { expected: String, derived: String },

    #[error("asset error: {0}")]
    Asset(#[from] anchor_asset::AssetError),

    #[error("codec error: {0}")]
    Codec(#[from] anchor_codec::CodecError),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Ledger(#[from] anchor_ledger::LedgerError),
}

pub type SdkResult<T> = Result<T, SdkError>;
