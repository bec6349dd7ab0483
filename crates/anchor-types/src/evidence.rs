use serde::{Deserialize, Serialize};

use crate::hash::Hash256;

/// Proof that a record was observed as persisted on the ledger.
///
/// Only commands read back from ledger history carry evidence; commands
/// built locally and not yet submitted have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Evidence {
    /// Height of the block that included the transaction.
    pub block_height: u64,
    /// Hash of the transaction carrying the record.
    pub transaction_hash: Hash256,
}

impl Evidence {
    pub fn new(block_height: u64, transaction_hash: Hash256) -> Self {
        Self {
            block_height,
            transaction_hash,
        }
    }
}
