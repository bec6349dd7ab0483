//! Ledger boundary for asset anchoring.
//!
//! The anchoring protocol only needs to read an account's first-seen height,
//! the transactions of a block, and optionally an account's incoming history.
//! This crate provides:
//! - The transaction model (transfers, aggregate bundles, everything else)
//! - The async [`LedgerClient`] trait the repository reads through
//! - [`InMemoryLedger`], a client for tests and offline tooling

pub mod error;
pub mod memory;
pub mod traits;
pub mod transaction;

pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use traits::LedgerClient;
pub use transaction::{
    AccountInfo, AggregateKind, AggregateTransaction, Deadline, OtherTransaction, PlainMessage,
    Transaction, TransactionInfo, TransactionType, TransferTransaction,
};
