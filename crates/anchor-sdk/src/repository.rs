use anchor_asset::{Asset, AssetCommand};
use anchor_codec::{encode_metadata, AssetDefinition};
use anchor_crypto::AssetIdentity;
use anchor_ledger::{
    AggregateTransaction, Deadline, LedgerClient, PlainMessage, Transaction, TransferTransaction,
};
use anchor_types::{Address, NetworkType, PublicKey};
use tracing::debug;

use crate::config::RepositoryConfig;
use crate::error::SdkResult;
use crate::reconstruct::ReconstructionEngine;

/// Publishes assets to, and reads them back from, a ledger.
///
/// Publishing only builds transactions; signing and announcing them is up
/// to the caller.
pub struct AssetRepository<C: LedgerClient> {
    client: C,
    config: RepositoryConfig,
}

impl<C: LedgerClient> AssetRepository<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, RepositoryConfig::default())
    }

    pub fn with_config(client: C, config: RepositoryConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn network(&self) -> NetworkType {
        self.config.network
    }

    /// Deadline for a transaction built now.
    pub fn deadline(&self) -> Deadline {
        self.config.deadline()
    }

    // ---- Publishing ----

    /// Build the bundle that defines `asset` on the ledger.
    ///
    /// The first inner transfer carries the definition record. A metadata
    /// record follows only when the asset has metadata.
    pub fn publish(&self, asset: &Asset, deadline: Deadline) -> AggregateTransaction {
        let definition = AssetDefinition::new(asset.source(), asset.identifier());
        let mut inner: Vec<Transaction> = vec![TransferTransaction::create(
            *asset.address(),
            PlainMessage::new(definition.encode()),
            deadline,
        )
        .into()];
        if !asset.metadata().is_empty() {
            inner.push(
                TransferTransaction::create(
                    *asset.address(),
                    PlainMessage::new(encode_metadata(asset.metadata())),
                    deadline,
                )
                .into(),
            );
        }
        debug!(address = %asset.address(), records = inner.len(), "asset bundle built");
        AggregateTransaction::complete(inner, deadline).signed_by(*asset.owner())
    }

    /// Build the transfer recording `command` against `asset`.
    ///
    /// Signed by the owner of `asset`, the state the command applies to.
    pub fn publish_command(
        &self,
        asset: &Asset,
        command: &AssetCommand,
        deadline: Deadline,
    ) -> TransferTransaction {
        TransferTransaction::create(
            *asset.address(),
            PlainMessage::new(command.to_dto()),
            deadline,
        )
        .signed_by(*asset.owner())
    }

    // ---- Lookups ----

    pub async fn by_asset_identifier(&self, source: &str, identifier: &str) -> SdkResult<Asset> {
        let identity = AssetIdentity::derive(source, identifier, self.network());
        self.by_address(&identity.address).await
    }

    pub async fn by_public_key(&self, public_key: &PublicKey) -> SdkResult<Asset> {
        self.by_address(&Address::from_public_key(public_key, self.network()))
            .await
    }

    /// Rebuild the asset anchored at `address`.
    ///
    /// Reads the block the address first appeared in, then replays commands
    /// from its incoming history when enabled.
    pub async fn by_address(&self, address: &Address) -> SdkResult<Asset> {
        let account = self.client.account_info(address).await?;
        let transactions = self
            .client
            .block_transactions(account.address_height)
            .await?;
        let asset = ReconstructionEngine::reconstruct(&transactions, address)?;

        if !self.config.replay_commands {
            return Ok(asset);
        }
        let history = self.client.incoming_transactions(address).await?;
        Ok(ReconstructionEngine::replay_commands(asset, &history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use anchor_ledger::{InMemoryLedger, LedgerError};
    use anchor_types::{Metadata, MetadataValue, PublicAccount};

    const OWNER_KEY: &str = "94814F5ACE5FEE9E5C1A97AA2545C5BE74C5D9801F66F1BC61547A7B6549BEBE";
    const NEW_OWNER_KEY: &str = "324E154A02A9037F61118A6C11D4CDD4B63A48545CDDC5E1F0C0A02E88154FA5";
    const IDENTIFIER: &str = "26198278f6e862fd82d26c7388a9ed19ed16282c2a4d562463b8b4336929c5d6";

    fn account(key: &str) -> PublicAccount {
        PublicAccount::from_public_key(key, NetworkType::MijinTest).unwrap()
    }

    fn sample_asset(metadata: Metadata) -> Asset {
        Asset::create(
            account(OWNER_KEY),
            "otherchain",
            IDENTIFIER,
            metadata,
            NetworkType::MijinTest,
        )
        .unwrap()
    }

    fn key_value() -> Metadata {
        [("key", "value")].into_iter().collect()
    }

    fn messages(bundle: &AggregateTransaction) -> Vec<String> {
        bundle
            .inner_transfers()
            .map(|tx| tx.message.payload().to_string())
            .collect()
    }

    #[test]
    fn publish_writes_definition_then_metadata() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let asset = sample_asset(key_value());
        let bundle = repo.publish(&asset, repo.deadline());

        assert_eq!(
            messages(&bundle),
            vec![
                format!("asset(1):otherchain,{IDENTIFIER}"),
                "metadata(1):key,value".to_string(),
            ]
        );
        assert_eq!(bundle.signer, Some(account(OWNER_KEY)));
        for tx in bundle.inner_transfers() {
            assert_eq!(tx.recipient.plain(), "SAG3VKH4XRCVYTMDMHUN62AH353TJC74BFDKKNOA");
        }
    }

    #[test]
    fn publish_without_metadata_has_one_record() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let bundle = repo.publish(&sample_asset(Metadata::new()), repo.deadline());
        assert_eq!(bundle.inner_transactions.len(), 1);
    }

    #[tokio::test]
    async fn published_asset_reads_back() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let asset = sample_asset(key_value());
        repo.client()
            .announce(repo.publish(&asset, repo.deadline()).into(), asset.owner())
            .unwrap();

        let by_identifier = repo.by_asset_identifier("otherchain", IDENTIFIER).await.unwrap();
        assert_eq!(by_identifier, asset);

        let by_key = repo.by_public_key(asset.public_key()).await.unwrap();
        assert_eq!(by_key, asset);

        let by_address = repo.by_address(asset.address()).await.unwrap();
        assert_eq!(
            by_address.get_metadata("key"),
            Some(&MetadataValue::String("value".into()))
        );
    }

    #[tokio::test]
    async fn unknown_address_is_ledger_error() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let err = repo.by_asset_identifier("otherchain", IDENTIFIER).await.unwrap_err();
        assert!(matches!(err, SdkError::Ledger(LedgerError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_bundles_are_not_an_asset() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let asset = sample_asset(key_value());
        let bundle: Transaction = repo.publish(&asset, repo.deadline()).into();
        repo.client()
            .announce_batch(vec![bundle.clone(), bundle], asset.owner())
            .unwrap();

        let err = repo.by_address(asset.address()).await.unwrap_err();
        assert!(matches!(err, SdkError::NotAnAsset { candidates: 2, .. }));
    }

    #[tokio::test]
    async fn plain_transfer_is_not_an_asset() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let asset = sample_asset(key_value());
        let transfer = TransferTransaction::create(
            *asset.address(),
            PlainMessage::new(format!("asset(1):otherchain,{IDENTIFIER}")),
            repo.deadline(),
        );
        repo.client().announce(transfer.into(), asset.owner()).unwrap();

        let err = repo.by_address(asset.address()).await.unwrap_err();
        assert!(matches!(err, SdkError::NotAnAsset { candidates: 0, .. }));
    }

    #[tokio::test]
    async fn transfer_command_is_replayed_with_evidence() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let asset = sample_asset(key_value());
        repo.client()
            .announce(repo.publish(&asset, repo.deadline()).into(), asset.owner())
            .unwrap();

        let command = AssetCommand::transfer_ownership(account(NEW_OWNER_KEY));
        let tx = repo.publish_command(&asset, &command, repo.deadline());
        assert_eq!(tx.signer, Some(account(OWNER_KEY)));
        let info = repo.client().announce(tx.into(), asset.owner()).unwrap();

        let restored = repo.by_address(asset.address()).await.unwrap();
        assert_eq!(restored.owner(), &account(NEW_OWNER_KEY));
        assert_eq!(restored.commands().len(), 1);
        let evidence = restored.commands()[0].evidence().unwrap();
        assert_eq!(evidence.block_height, 2);
        assert_eq!(evidence.transaction_hash, info.hash);
    }

    #[tokio::test]
    async fn command_from_non_owner_is_ignored() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let asset = sample_asset(key_value());
        repo.client()
            .announce(repo.publish(&asset, repo.deadline()).into(), asset.owner())
            .unwrap();

        let stranger = account(NEW_OWNER_KEY);
        let command = AssetCommand::transfer_ownership(stranger);
        let tx = repo.publish_command(&asset, &command, repo.deadline());
        repo.client().announce(tx.into(), &stranger).unwrap();

        let restored = repo.by_address(asset.address()).await.unwrap();
        assert_eq!(restored.owner(), &account(OWNER_KEY));
        assert!(restored.commands().is_empty());
    }

    #[tokio::test]
    async fn chained_transfers_follow_the_owner() {
        let repo = AssetRepository::new(InMemoryLedger::new());
        let asset = sample_asset(Metadata::new());
        repo.client()
            .announce(repo.publish(&asset, repo.deadline()).into(), asset.owner())
            .unwrap();

        let first = AssetCommand::transfer_ownership(account(NEW_OWNER_KEY));
        let tx = repo.publish_command(&asset, &first, repo.deadline());
        repo.client().announce(tx.into(), asset.owner()).unwrap();

        let transferred = asset.transfer_ownership(account(NEW_OWNER_KEY));
        let back = AssetCommand::transfer_ownership(account(OWNER_KEY));
        let tx = repo.publish_command(&transferred, &back, repo.deadline());
        repo.client().announce(tx.into(), transferred.owner()).unwrap();

        let restored = repo.by_address(asset.address()).await.unwrap();
        assert_eq!(restored.owner(), &account(OWNER_KEY));
        assert_eq!(restored.commands().len(), 2);
        assert!(restored.commands().iter().all(AssetCommand::is_persisted));
    }

    #[tokio::test]
    async fn replay_can_be_disabled() {
        let config = RepositoryConfig {
            replay_commands: false,
            ..RepositoryConfig::default()
        };
        let repo = AssetRepository::with_config(InMemoryLedger::new(), config);
        let asset = sample_asset(key_value());
        repo.client()
            .announce(repo.publish(&asset, repo.deadline()).into(), asset.owner())
            .unwrap();
        let command = AssetCommand::transfer_ownership(account(NEW_OWNER_KEY));
        let tx = repo.publish_command(&asset, &command, repo.deadline());
        repo.client().announce(tx.into(), asset.owner()).unwrap();

        let restored = repo.by_address(asset.address()).await.unwrap();
        assert_eq!(restored.owner(), &account(OWNER_KEY));
        assert!(restored.commands().is_empty());
    }
}
