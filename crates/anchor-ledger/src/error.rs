/// Errors produced by ledger clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("block not found at height {0}")]
    BlockNotFound(u64),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("ledger lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
