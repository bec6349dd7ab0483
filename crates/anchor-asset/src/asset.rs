use anchor_crypto::AssetIdentity;
use anchor_types::{
    Address, Metadata, MetadataValue, NetworkType, PublicAccount, PublicKey, TypeError,
};
use serde::Serialize;

use crate::command::AssetCommand;
use crate::error::AssetResult;

/// An application asset anchored at a ledger address.
///
/// Assets are never mutated. [`Asset::transfer_ownership`] and
/// [`AssetCommand::apply`] return a new asset; the old one is unchanged.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Asset {
    identity: AssetIdentity,
    owner: PublicAccount,
    metadata: Metadata,
    commands: Vec<AssetCommand>,
    network: NetworkType,
}

impl Asset {
    /// Create a fresh asset with no command history.
    ///
    /// Fails if the metadata cannot be written to the ledger as-is, or if
    /// `source` contains a comma (the definition record splits on the first
    /// one).
    pub fn create(
        owner: PublicAccount,
        source: &str,
        identifier: &str,
        metadata: Metadata,
        network: NetworkType,
    ) -> AssetResult<Self> {
        if source.contains(',') {
            return Err(TypeError::ReservedCharacter {
                key: "source".into(),
                character: ',',
            }
            .into());
        }
        metadata.validate_encodable()?;
        let identity = AssetIdentity::derive(source, identifier, network);
        Self::restore(identity, owner, metadata, network)
    }

    /// Rebuild an asset from an identity that was already derived.
    ///
    /// Metadata read back from the ledger may hold numbers that
    /// [`Asset::create`] would refuse to write, such as `1e-3`; those are
    /// kept.
    pub fn restore(
        identity: AssetIdentity,
        owner: PublicAccount,
        metadata: Metadata,
        network: NetworkType,
    ) -> AssetResult<Self> {
        metadata.validate()?;
        Ok(Self {
            identity,
            owner,
            metadata,
            commands: Vec::new(),
            network,
        })
    }

    pub fn identity(&self) -> &AssetIdentity {
        &self.identity
    }

    pub fn source(&self) -> &str {
        &self.identity.source
    }

    pub fn identifier(&self) -> &str {
        &self.identity.identifier
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.identity.public_key
    }

    pub fn address(&self) -> &Address {
        &self.identity.address
    }

    pub fn owner(&self) -> &PublicAccount {
        &self.owner
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn get_metadata(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// Commands applied since creation, oldest first.
    pub fn commands(&self) -> &[AssetCommand] {
        &self.commands
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Hand the asset to `new_owner`.
    ///
    /// The recorded command is unpersisted until it is read back from the
    /// ledger.
    pub fn transfer_ownership(&self, new_owner: PublicAccount) -> Self {
        AssetCommand::transfer_ownership(new_owner).apply(self)
    }

    pub(crate) fn with_applied(&self, owner: PublicAccount, command: AssetCommand) -> Self {
        let mut next = self.clone();
        next.owner = owner;
        next.commands.push(command);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetError;

    const OWNER_KEY: &str = "94814F5ACE5FEE9E5C1A97AA2545C5BE74C5D9801F66F1BC61547A7B6549BEBE";
    const NEW_OWNER_KEY: &str = "324E154A02A9037F61118A6C11D4CDD4B63A48545CDDC5E1F0C0A02E88154FA5";
    const IDENTIFIER: &str = "26198278f6e862fd82d26c7388a9ed19ed16282c2a4d562463b8b4336929c5d6";

    fn owner() -> PublicAccount {
        PublicAccount::from_public_key(OWNER_KEY, NetworkType::MijinTest).unwrap()
    }

    fn sample_metadata() -> Metadata {
        [("key", "value")].into_iter().collect()
    }

    fn sample_asset() -> Asset {
        Asset::create(
            owner(),
            "otherchain",
            IDENTIFIER,
            sample_metadata(),
            NetworkType::MijinTest,
        )
        .unwrap()
    }

    #[test]
    fn create_derives_identity() {
        let asset = sample_asset();
        assert_eq!(
            asset.public_key().to_hex(),
            "1485030412335ACAE6A59E8F5826AA7B7EAA831EAC73FE60E6A00E893A306F71"
        );
        assert_eq!(asset.address().plain(), "SAG3VKH4XRCVYTMDMHUN62AH353TJC74BFDKKNOA");
        assert_eq!(asset.source(), "otherchain");
        assert_eq!(asset.identifier(), IDENTIFIER);
        assert_eq!(asset.owner(), &owner());
        assert_eq!(asset.network(), NetworkType::MijinTest);
        assert!(asset.commands().is_empty());
    }

    #[test]
    fn get_metadata_by_key() {
        let asset = sample_asset();
        assert_eq!(
            asset.get_metadata("key"),
            Some(&MetadataValue::String("value".into()))
        );
        assert_eq!(asset.get_metadata("missing"), None);
    }

    #[test]
    fn create_rejects_reserved_characters() {
        for input in ["value,", "value.", ",", ".", ",.value"] {
            let metadata: Metadata = [("key", input)].into_iter().collect();
            let result = Asset::create(
                owner(),
                "otherchain",
                IDENTIFIER,
                metadata,
                NetworkType::MijinTest,
            );
            assert!(
                matches!(result, Err(AssetError::Validation(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn create_rejects_comma_in_source() {
        let result = Asset::create(
            owner(),
            "other,chain",
            IDENTIFIER,
            Metadata::new(),
            NetworkType::MijinTest,
        );
        assert_eq!(
            result.unwrap_err(),
            AssetError::Validation(TypeError::ReservedCharacter {
                key: "source".into(),
                character: ','
            })
        );
    }

    #[test]
    fn transfer_ownership_returns_new_asset() {
        let asset = sample_asset();
        let new_owner = PublicAccount::from_public_key(NEW_OWNER_KEY, NetworkType::MijinTest).unwrap();

        let transferred = asset.transfer_ownership(new_owner);

        assert_eq!(transferred.owner(), &new_owner);
        assert_eq!(
            transferred.owner().address.plain(),
            "SAVNIRCFGNHNMIUTJ6NJ7XTWDDULOMSJ2TZOSXNM"
        );
        assert_eq!(transferred.commands().len(), 1);
        assert!(!transferred.commands()[0].is_persisted());
        assert_eq!(transferred.identity(), asset.identity());
        assert_eq!(transferred.metadata(), asset.metadata());

        assert_eq!(asset.owner(), &owner());
        assert!(asset.commands().is_empty());
    }

    #[test]
    fn restore_validates_metadata() {
        let identity = AssetIdentity::derive("otherchain", IDENTIFIER, NetworkType::MijinTest);
        let bad: Metadata = [("key", "a:b")].into_iter().collect();
        assert!(Asset::restore(identity.clone(), owner(), bad, NetworkType::MijinTest).is_err());
        let asset = Asset::restore(identity, owner(), sample_metadata(), NetworkType::MijinTest).unwrap();
        assert_eq!(asset, sample_asset());
    }

    #[test]
    fn fractional_numbers_restore_but_do_not_create() {
        let ratio: Metadata = [("ratio", 0.001)].into_iter().collect();
        let created = Asset::create(
            owner(),
            "otherchain",
            IDENTIFIER,
            ratio.clone(),
            NetworkType::MijinTest,
        );
        assert_eq!(
            created.unwrap_err(),
            AssetError::Validation(TypeError::ReservedCharacter {
                key: "ratio".into(),
                character: '.'
            })
        );

        let identity = AssetIdentity::derive("otherchain", IDENTIFIER, NetworkType::MijinTest);
        let restored = Asset::restore(identity, owner(), ratio, NetworkType::MijinTest).unwrap();
        assert_eq!(restored.get_metadata("ratio"), Some(&MetadataValue::Number(0.001)));
    }
}
