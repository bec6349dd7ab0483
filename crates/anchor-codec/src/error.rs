use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("record does not start with {expected}: {found}")]
    InvalidPrefix { expected: &'static str, found: String },

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("unsupported {kind} record version {version}")]
    UnsupportedVersion { kind: &'static str, version: u32 },

    #[error("unknown record: {0}")]
    UnknownRecord(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
