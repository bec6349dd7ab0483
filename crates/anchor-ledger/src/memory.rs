use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use anchor_crypto::transaction_hash;
use anchor_types::{Address, PublicAccount, PublicKey};
use async_trait::async_trait;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerClient;
use crate::transaction::{AccountInfo, Transaction, TransactionInfo};

/// In-memory ledger for tests, offline tooling, and embedding.
///
/// Every announce call seals one block. Transactions are signed by the
/// announcing account and receive a content hash and their block height.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    height: u64,
    blocks: BTreeMap<u64, Vec<Transaction>>,
    accounts: HashMap<Address, AccountRecord>,
    incoming: HashMap<Address, Vec<Transaction>>,
}

struct AccountRecord {
    first_seen: u64,
    public_key: Option<PublicKey>,
}

impl LedgerState {
    fn observe(&mut self, address: Address, public_key: Option<PublicKey>, height: u64) {
        let record = self.accounts.entry(address).or_insert(AccountRecord {
            first_seen: height,
            public_key: None,
        });
        if record.public_key.is_none() {
            record.public_key = public_key;
        }
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign `transaction` as `signer` and seal it into a new block.
    pub fn announce(
        &self,
        transaction: Transaction,
        signer: &PublicAccount,
    ) -> LedgerResult<TransactionInfo> {
        let mut infos = self.announce_batch(vec![transaction], signer)?;
        infos
            .pop()
            .ok_or_else(|| LedgerError::Serialization("empty block sealed".into()))
    }

    /// Sign every transaction as `signer` and seal them into one block.
    pub fn announce_batch(
        &self,
        transactions: Vec<Transaction>,
        signer: &PublicAccount,
    ) -> LedgerResult<Vec<TransactionInfo>> {
        let mut state = self.write_state()?;
        let height = state.height + 1;

        // Seal the whole block before touching the indexes.
        let mut block = Vec::with_capacity(transactions.len());
        let mut infos = Vec::with_capacity(transactions.len());
        for (index, transaction) in transactions.into_iter().enumerate() {
            let signed = transaction.signed_by(*signer);
            let hash = transaction_hash(&(height, index, &signed))
                .map_err(|e| LedgerError::Serialization(e.to_string()))?;
            let info = TransactionInfo { height, hash };
            debug!(height, hash = %hash, type_code = signed.type_code(), "transaction sealed");
            infos.push(info);
            block.push(signed.with_info(info));
        }

        for sealed in &block {
            state.observe(signer.address, Some(signer.public_key), height);
            for recipient in sealed.recipients() {
                state.observe(recipient, None, height);
                state
                    .incoming
                    .entry(recipient)
                    .or_default()
                    .push(sealed.clone());
            }
        }

        state.blocks.insert(height, block);
        state.height = height;
        Ok(infos)
    }

    fn read_state(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, LedgerState>> {
        self.inner
            .read()
            .map_err(|_| LedgerError::LockPoisoned("ledger read lock poisoned".into()))
    }

    fn write_state(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, LedgerState>> {
        self.inner
            .write()
            .map_err(|_| LedgerError::LockPoisoned("ledger write lock poisoned".into()))
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn account_info(&self, address: &Address) -> LedgerResult<AccountInfo> {
        let state = self.read_state()?;
        let record = state
            .accounts
            .get(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.plain()))?;
        Ok(AccountInfo {
            address: *address,
            address_height: record.first_seen,
            public_key: record.public_key,
        })
    }

    async fn block_transactions(&self, height: u64) -> LedgerResult<Vec<Transaction>> {
        let state = self.read_state()?;
        state
            .blocks
            .get(&height)
            .cloned()
            .ok_or(LedgerError::BlockNotFound(height))
    }

    async fn incoming_transactions(&self, address: &Address) -> LedgerResult<Vec<Transaction>> {
        let state = self.read_state()?;
        Ok(state.incoming.get(address).cloned().unwrap_or_default())
    }
}
