use anchor_types::Address;
use async_trait::async_trait;

use crate::error::LedgerResult;
use crate::transaction::{AccountInfo, Transaction};

/// Read boundary to a ledger node.
///
/// Implementations do their own transport; errors are passed through to
/// callers unchanged and never retried.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Account state, including the height the account was first seen at.
    async fn account_info(&self, address: &Address) -> LedgerResult<AccountInfo>;

    /// Every top-level transaction included in the block at `height`.
    async fn block_transactions(&self, height: u64) -> LedgerResult<Vec<Transaction>>;

    /// Transactions that deliver a transfer to `address`, in any order.
    ///
    /// Clients that cannot list history return nothing.
    async fn incoming_transactions(&self, _address: &Address) -> LedgerResult<Vec<Transaction>> {
        Ok(Vec::new())
    }
}
