use anchor_asset::{Asset, AssetCommand};
use anchor_codec::{extract_metadata, AssetDefinition, CodecError, CommandDescriptor};
use anchor_crypto::AssetIdentity;
use anchor_ledger::{AggregateTransaction, Transaction, TransactionInfo};
use anchor_types::{Address, Evidence, PublicAccount};
use tracing::{debug, info, warn};

use crate::error::{SdkError, SdkResult};

/// Rebuilds assets from the transactions observed at their address.
pub struct ReconstructionEngine;

impl ReconstructionEngine {
    /// The single bundle defining the asset at `address`.
    ///
    /// A bundle qualifies when its first inner transaction is a transfer to
    /// `address`. Anything other than exactly one match is not an asset.
    pub fn select_bundle<'a>(
        transactions: &'a [Transaction],
        address: &Address,
    ) -> SdkResult<&'a AggregateTransaction> {
        let candidates: Vec<&AggregateTransaction> = transactions
            .iter()
            .filter_map(|tx| match tx {
                Transaction::Aggregate(aggregate) => Some(aggregate),
                _ => None,
            })
            .filter(|aggregate| {
                matches!(
                    aggregate.inner_transactions.first(),
                    Some(Transaction::Transfer(first)) if first.recipient == *address
                )
            })
            .collect();

        match candidates.as_slice() {
            [bundle] => Ok(bundle),
            _ => Err(SdkError::NotAnAsset {
                address: address.plain(),
                candidates: candidates.len(),
            }),
        }
    }

    /// Rebuild the asset defined among `transactions` at `address`.
    ///
    /// The definition record is re-derived and must land on `address`.
    /// The returned asset has no command history.
    pub fn reconstruct(transactions: &[Transaction], address: &Address) -> SdkResult<Asset> {
        let bundle = Self::select_bundle(transactions, address)?;
        let mut messages = bundle.inner_transfers().map(|tx| tx.message.payload());

        let first = messages.next().unwrap_or_default();
        let definition =
            AssetDefinition::decode(first).map_err(|_| SdkError::InvalidPrefix(first.to_string()))?;

        let network = address.network();
        let identity = AssetIdentity::derive(&definition.source, &definition.identifier, network);
        if identity.address != *address {
            warn!(
                expected = %address,
                derived = %identity.address,
                "asset definition does not match its address"
            );
            return Err(SdkError::IdentityMismatch {
                expected: address.plain(),
                derived: identity.address.plain(),
            });
        }

        let metadata = extract_metadata(messages)?;
        let owner = bundle
            .signer
            .ok_or_else(|| CodecError::MalformedRecord("asset bundle has no signer".into()))?;

        let asset = Asset::restore(identity, owner, metadata, network)?;
        info!(
            address = %address,
            source = asset.source(),
            owner = %owner.address,
            metadata = asset.metadata().len(),
            "asset reconstructed"
        );
        Ok(asset)
    }

    /// Replay command records found in `history` on top of `asset`.
    ///
    /// Records are applied in ascending block height. Each applied command
    /// carries evidence of where it was found. Records signed by anyone but
    /// the owner at that point, or without ledger info, are skipped.
    pub fn replay_commands(asset: Asset, history: &[Transaction]) -> Asset {
        let address = *asset.address();
        let mut records: Vec<(Option<TransactionInfo>, Option<PublicAccount>, &str)> = history
            .iter()
            .flat_map(|tx| {
                tx.transfers()
                    .into_iter()
                    .filter(move |transfer| transfer.recipient == address)
                    .filter(|transfer| CommandDescriptor::is_command(transfer.message.payload()))
                    .map(move |transfer| {
                        (
                            tx.info().copied(),
                            transfer.signer.or(tx.signer().copied()),
                            transfer.message.payload(),
                        )
                    })
            })
            .collect();
        records.sort_by_key(|(info, _, _)| info.map(|i| i.height));

        let mut current = asset;
        for (tx_info, signer, text) in records {
            let Some(tx_info) = tx_info else {
                warn!(command = text, "skipping command without ledger info");
                continue;
            };
            if signer.map(|s| s.public_key) != Some(current.owner().public_key) {
                warn!(
                    command = text,
                    height = tx_info.height,
                    "skipping command not signed by the current owner"
                );
                continue;
            }
            let command = match AssetCommand::from_descriptor(text, current.network()) {
                Ok(command) => command,
                Err(err) => {
                    warn!(command = text, error = %err, "skipping unreadable command");
                    continue;
                }
            };
            debug!(
                kind = command.kind().name(),
                height = tx_info.height,
                hash = %tx_info.hash,
                "replaying command"
            );
            current = command
                .with_evidence(Evidence::new(tx_info.height, tx_info.hash))
                .apply(&current);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_ledger::{Deadline, PlainMessage, TransferTransaction};
    use anchor_types::{Hash256, NetworkType};

    const OWNER_KEY: &str = "94814F5ACE5FEE9E5C1A97AA2545C5BE74C5D9801F66F1BC61547A7B6549BEBE";
    const NEW_OWNER_KEY: &str = "324E154A02A9037F61118A6C11D4CDD4B63A48545CDDC5E1F0C0A02E88154FA5";
    const ASSET_ADDRESS: &str = "SAG3VKH4XRCVYTMDMHUN62AH353TJC74BFDKKNOA";
    const IDENTIFIER: &str = "26198278f6e862fd82d26c7388a9ed19ed16282c2a4d562463b8b4336929c5d6";

    fn account(key: &str) -> PublicAccount {
        PublicAccount::from_public_key(key, NetworkType::MijinTest).unwrap()
    }

    fn asset_address() -> Address {
        Address::from_raw(ASSET_ADDRESS).unwrap()
    }

    fn transfer(message: &str) -> Transaction {
        TransferTransaction::create(asset_address(), PlainMessage::new(message), Deadline::default())
            .into()
    }

    fn bundle(messages: &[&str]) -> Transaction {
        AggregateTransaction::complete(
            messages.iter().map(|m| transfer(m)).collect(),
            Deadline::default(),
        )
        .signed_by(account(OWNER_KEY))
        .into()
    }

    fn info(height: u64, seed: u8) -> TransactionInfo {
        TransactionInfo {
            height,
            hash: Hash256::from_bytes([seed; 32]),
        }
    }

    fn command_from(signer: &str, new_owner: &str, tx_info: Option<TransactionInfo>) -> Transaction {
        let tx = transfer(&format!("asset_command(transfer_ownership,1):{new_owner}"))
            .signed_by(account(signer));
        match tx_info {
            Some(i) => tx.with_info(i),
            None => tx,
        }
    }

    fn definition() -> String {
        format!("asset(1):otherchain,{IDENTIFIER}")
    }

    #[test]
    fn exponent_metadata_survives_reconstruction() {
        let txs = vec![bundle(&[&definition(), "metadata(1):ratio,1e-3"])];
        let asset = ReconstructionEngine::reconstruct(&txs, &asset_address()).unwrap();
        assert_eq!(
            asset.get_metadata("ratio"),
            Some(&anchor_types::MetadataValue::Number(0.001))
        );
    }

    #[test]
    fn reconstructs_known_asset() {
        let txs = vec![bundle(&[&definition(), "metadata(1):key,value"])];
        let asset = ReconstructionEngine::reconstruct(&txs, &asset_address()).unwrap();
        assert_eq!(
            asset.public_key().to_hex(),
            "1485030412335ACAE6A59E8F5826AA7B7EAA831EAC73FE60E6A00E893A306F71"
        );
        assert_eq!(asset.owner(), &account(OWNER_KEY));
        assert_eq!(asset.get_metadata("key").and_then(|v| v.as_str()), Some("value"));
    }

    #[test]
    fn zero_or_two_bundles_is_not_an_asset() {
        let err = ReconstructionEngine::reconstruct(&[transfer(&definition())], &asset_address())
            .unwrap_err();
        assert!(matches!(err, SdkError::NotAnAsset { candidates: 0, .. }));

        let twice = vec![bundle(&[&definition()]), bundle(&[&definition()])];
        let err = ReconstructionEngine::reconstruct(&twice, &asset_address()).unwrap_err();
        assert!(matches!(err, SdkError::NotAnAsset { candidates: 2, .. }));
    }

    #[test]
    fn first_record_must_be_definition() {
        let txs = vec![bundle(&["metadata(1):key,value", &definition()])];
        let err = ReconstructionEngine::reconstruct(&txs, &asset_address()).unwrap_err();
        assert!(matches!(err, SdkError::InvalidPrefix(text) if text == "metadata(1):key,value"));
    }

    #[test]
    fn tampered_definition_is_rejected() {
        let txs = vec![bundle(&["asset(1):otherchain,other-id"])];
        let err = ReconstructionEngine::reconstruct(&txs, &asset_address()).unwrap_err();
        match err {
            SdkError::IdentityMismatch { expected, derived } => {
                assert_eq!(expected, ASSET_ADDRESS);
                assert_eq!(derived, "SCMGL7FCWB25Z2M5BQWQP745CH25ZHFG3D7CJFNX");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unprefixed_records_are_skipped_and_malformed_fail() {
        let txs = vec![bundle(&[&definition(), "hello", "metadata(1):a,1"])];
        let asset = ReconstructionEngine::reconstruct(&txs, &asset_address()).unwrap();
        assert_eq!(asset.metadata().len(), 1);

        let txs = vec![bundle(&[&definition(), "metadata(1):a,1,2"])];
        let err = ReconstructionEngine::reconstruct(&txs, &asset_address()).unwrap_err();
        assert!(matches!(err, SdkError::Codec(CodecError::MalformedRecord(_))));
    }

    #[test]
    fn unsigned_bundle_is_malformed() {
        let unsigned: Transaction =
            AggregateTransaction::complete(vec![transfer(&definition())], Deadline::default()).into();
        let err = ReconstructionEngine::reconstruct(&[unsigned], &asset_address()).unwrap_err();
        assert!(matches!(err, SdkError::Codec(CodecError::MalformedRecord(_))));
    }

    #[test]
    fn replay_orders_by_height_and_checks_owner() {
        let txs = vec![bundle(&[&definition()])];
        let asset = ReconstructionEngine::reconstruct(&txs, &asset_address()).unwrap();

        let history = vec![
            command_from(NEW_OWNER_KEY, OWNER_KEY, Some(info(5, 2))),
            command_from(NEW_OWNER_KEY, NEW_OWNER_KEY, Some(info(2, 9))),
            command_from(OWNER_KEY, NEW_OWNER_KEY, Some(info(3, 1))),
            command_from(OWNER_KEY, NEW_OWNER_KEY, None),
        ];
        let replayed = ReconstructionEngine::replay_commands(asset, &history);

        assert_eq!(replayed.owner(), &account(OWNER_KEY));
        assert_eq!(replayed.commands().len(), 2);
        let heights: Vec<u64> = replayed
            .commands()
            .iter()
            .map(|c| c.evidence().unwrap().block_height)
            .collect();
        assert_eq!(heights, vec![3, 5]);
    }
}
