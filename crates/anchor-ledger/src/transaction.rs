use anchor_types::{Address, Hash256, PublicAccount, PublicKey};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Type codes of the transactions the anchoring protocol reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Transfer,
    AggregateComplete,
    AggregateBonded,
}

impl TransactionType {
    pub const fn code(self) -> u16 {
        match self {
            Self::Transfer => 0x4154,
            Self::AggregateComplete => 0x4141,
            Self::AggregateBonded => 0x4241,
        }
    }
}

/// Time after which the ledger no longer accepts a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    pub const DEFAULT_HOURS: i64 = 2;

    /// A deadline `hours` from now.
    pub fn create(hours: i64) -> Self {
        Self(Utc::now() + Duration::hours(hours))
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::create(Self::DEFAULT_HOURS)
    }
}

/// Unencrypted message attached to a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlainMessage(String);

impl PlainMessage {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn payload(&self) -> &str {
        &self.0
    }
}

/// Where a transaction landed. Present only on transactions read from a ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub height: u64,
    pub hash: Hash256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: Address,
    /// Height of the block the address first appeared in.
    pub address_height: u64,
    /// Known once the account has signed something.
    pub public_key: Option<PublicKey>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTransaction {
    pub recipient: Address,
    pub message: PlainMessage,
    pub deadline: Deadline,
    pub signer: Option<PublicAccount>,
    pub info: Option<TransactionInfo>,
}

impl TransferTransaction {
    /// An unsigned transfer carrying `message`.
    pub fn create(recipient: Address, message: PlainMessage, deadline: Deadline) -> Self {
        Self {
            recipient,
            message,
            deadline,
            signer: None,
            info: None,
        }
    }

    pub fn signed_by(mut self, signer: PublicAccount) -> Self {
        self.signer = Some(signer);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Complete,
    Bonded,
}

/// A bundle of inner transactions announced together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTransaction {
    pub kind: AggregateKind,
    pub inner_transactions: Vec<Transaction>,
    pub deadline: Deadline,
    pub signer: Option<PublicAccount>,
    pub info: Option<TransactionInfo>,
}

impl AggregateTransaction {
    pub fn complete(inner_transactions: Vec<Transaction>, deadline: Deadline) -> Self {
        Self {
            kind: AggregateKind::Complete,
            inner_transactions,
            deadline,
            signer: None,
            info: None,
        }
    }

    /// Sign the bundle. Inner transactions without a signer take the same one.
    pub fn signed_by(mut self, signer: PublicAccount) -> Self {
        self.signer = Some(signer);
        self.inner_transactions = self
            .inner_transactions
            .into_iter()
            .map(|inner| match inner.signer() {
                Some(_) => inner,
                None => inner.signed_by(signer),
            })
            .collect();
        self
    }

    /// Inner transfers in bundle order, skipping other kinds.
    pub fn inner_transfers(&self) -> impl Iterator<Item = &TransferTransaction> {
        self.inner_transactions.iter().filter_map(|inner| match inner {
            Transaction::Transfer(transfer) => Some(transfer),
            _ => None,
        })
    }
}

/// A transaction of a type the protocol does not interpret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherTransaction {
    pub type_id: u16,
    pub deadline: Deadline,
    pub signer: Option<PublicAccount>,
    pub info: Option<TransactionInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    Transfer(TransferTransaction),
    Aggregate(AggregateTransaction),
    Other(OtherTransaction),
}

impl Transaction {
    pub fn type_code(&self) -> u16 {
        match self {
            Self::Transfer(_) => TransactionType::Transfer.code(),
            Self::Aggregate(aggregate) => match aggregate.kind {
                AggregateKind::Complete => TransactionType::AggregateComplete.code(),
                AggregateKind::Bonded => TransactionType::AggregateBonded.code(),
            },
            Self::Other(other) => other.type_id,
        }
    }

    pub fn signer(&self) -> Option<&PublicAccount> {
        match self {
            Self::Transfer(tx) => tx.signer.as_ref(),
            Self::Aggregate(tx) => tx.signer.as_ref(),
            Self::Other(tx) => tx.signer.as_ref(),
        }
    }

    pub fn info(&self) -> Option<&TransactionInfo> {
        match self {
            Self::Transfer(tx) => tx.info.as_ref(),
            Self::Aggregate(tx) => tx.info.as_ref(),
            Self::Other(tx) => tx.info.as_ref(),
        }
    }

    pub fn deadline(&self) -> &Deadline {
        match self {
            Self::Transfer(tx) => &tx.deadline,
            Self::Aggregate(tx) => &tx.deadline,
            Self::Other(tx) => &tx.deadline,
        }
    }

    pub fn signed_by(self, signer: PublicAccount) -> Self {
        match self {
            Self::Transfer(tx) => Self::Transfer(tx.signed_by(signer)),
            Self::Aggregate(tx) => Self::Aggregate(tx.signed_by(signer)),
            Self::Other(mut tx) => {
                tx.signer = Some(signer);
                Self::Other(tx)
            }
        }
    }

    pub fn with_info(mut self, info: TransactionInfo) -> Self {
        match &mut self {
            Self::Transfer(tx) => tx.info = Some(info),
            Self::Aggregate(tx) => tx.info = Some(info),
            Self::Other(tx) => tx.info = Some(info),
        }
        self
    }

    /// Transfers this transaction delivers, including those inside a bundle.
    pub fn transfers(&self) -> Vec<&TransferTransaction> {
        match self {
            Self::Transfer(transfer) => vec![transfer],
            Self::Aggregate(aggregate) => aggregate.inner_transfers().collect(),
            Self::Other(_) => Vec::new(),
        }
    }

    /// Addresses receiving a transfer from this transaction, without repeats.
    pub fn recipients(&self) -> Vec<Address> {
        let mut recipients: Vec<Address> = Vec::new();
        for transfer in self.transfers() {
            if !recipients.contains(&transfer.recipient) {
                recipients.push(transfer.recipient);
            }
        }
        recipients
    }
}

impl From<TransferTransaction> for Transaction {
    fn from(tx: TransferTransaction) -> Self {
        Self::Transfer(tx)
    }
}

impl From<AggregateTransaction> for Transaction {
    fn from(tx: AggregateTransaction) -> Self {
        Self::Aggregate(tx)
    }
}

impl From<OtherTransaction> for Transaction {
    fn from(tx: OtherTransaction) -> Self {
        Self::Other(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_types::NetworkType;

    const OWNER_KEY: &str = "94814F5ACE5FEE9E5C1A97AA2545C5BE74C5D9801F66F1BC61547A7B6549BEBE";
    const OTHER_KEY: &str = "324E154A02A9037F61118A6C11D4CDD4B63A48545CDDC5E1F0C0A02E88154FA5";

    fn account(key: &str) -> PublicAccount {
        PublicAccount::from_public_key(key, NetworkType::MijinTest).unwrap()
    }

    fn transfer(to: &str, message: &str) -> Transaction {
        TransferTransaction::create(account(to).address, PlainMessage::new(message), Deadline::default())
            .into()
    }

    #[test]
    fn type_codes() {
        assert_eq!(TransactionType::Transfer.code(), 0x4154);
        assert_eq!(TransactionType::AggregateComplete.code(), 0x4141);
        assert_eq!(TransactionType::AggregateBonded.code(), 0x4241);
    }

    #[test]
    fn default_deadline_is_two_hours_ahead() {
        let deadline = Deadline::default();
        let ahead = deadline.timestamp() - Utc::now();
        assert!(ahead > Duration::minutes(119));
        assert!(ahead <= Duration::hours(2));
        assert!(Deadline::create(-1).timestamp() < Utc::now());
    }

    #[test]
    fn aggregate_signs_unsigned_inner_transactions() {
        let presigned = match transfer(OTHER_KEY, "b") {
            Transaction::Transfer(tx) => tx.signed_by(account(OTHER_KEY)),
            _ => unreachable!(),
        };
        let aggregate = AggregateTransaction::complete(
            vec![transfer(OTHER_KEY, "a"), presigned.into()],
            Deadline::default(),
        )
        .signed_by(account(OWNER_KEY));

        assert_eq!(aggregate.signer, Some(account(OWNER_KEY)));
        let signers: Vec<_> = aggregate
            .inner_transfers()
            .map(|tx| tx.signer.unwrap().public_key.to_hex())
            .collect();
        assert_eq!(signers, vec![OWNER_KEY, OTHER_KEY]);
    }

    #[test]
    fn recipients_are_deduplicated() {
        let aggregate: Transaction = AggregateTransaction {
            kind: AggregateKind::Bonded,
            ..AggregateTransaction::complete(
                vec![transfer(OTHER_KEY, "a"), transfer(OTHER_KEY, "b"), transfer(OWNER_KEY, "c")],
                Deadline::default(),
            )
        }
        .into();
        assert_eq!(aggregate.type_code(), 0x4241);
        assert_eq!(aggregate.transfers().len(), 3);
        assert_eq!(
            aggregate.recipients(),
            vec![account(OTHER_KEY).address, account(OWNER_KEY).address]
        );
    }

    #[test]
    fn other_transactions_carry_no_transfers() {
        let other: Transaction = OtherTransaction {
            type_id: 0x414d,
            deadline: Deadline::default(),
            signer: None,
            info: None,
        }
        .into();
        assert_eq!(other.type_code(), 0x414d);
        assert!(other.transfers().is_empty());
    }

    #[test]
    fn serde_roundtrip_keeps_message() {
        let tx = transfer(OTHER_KEY, "asset(1):otherchain,abc").signed_by(account(OWNER_KEY));
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"type\":\"transfer\""));
        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tx);
    }
}
