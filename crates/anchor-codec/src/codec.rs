use anchor_types::Metadata;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::CommandDescriptor;
use crate::error::{CodecError, CodecResult};
use crate::metadata::{decode_metadata, encode_metadata};
use crate::record::{RecordHeader, RecordKind, ASSET_PREFIX};

/// The `(source, identifier)` pair that names an asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetDefinition {
    pub source: String,
    pub identifier: String,
}

impl AssetDefinition {
    pub fn new(source: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            identifier: identifier.into(),
        }
    }

    pub fn encode(&self) -> String {
        format!("{ASSET_PREFIX}{},{}", self.source, self.identifier)
    }

    /// Decode an `asset(1):` record.
    ///
    /// The payload is split at its first comma, so an identifier may itself
    /// contain commas but a source may not.
    pub fn decode(text: &str) -> CodecResult<Self> {
        let payload = text
            .strip_prefix(ASSET_PREFIX)
            .ok_or_else(|| CodecError::InvalidPrefix {
                expected: ASSET_PREFIX,
                found: text.to_string(),
            })?;
        let (source, identifier) = payload
            .split_once(',')
            .ok_or_else(|| CodecError::MalformedRecord(text.to_string()))?;
        Ok(Self::new(source, identifier))
    }
}

/// Any record the codec understands.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    AssetDefinition(AssetDefinition),
    Metadata(Metadata),
    Command(CommandDescriptor),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::AssetDefinition(_) => RecordKind::AssetDefinition,
            Self::Metadata(_) => RecordKind::Metadata,
            Self::Command(command) => command.kind(),
        }
    }
}

/// Encoder and version-dispatching decoder for ledger records.
pub struct RecordCodec;

impl RecordCodec {
    /// Encode a record at its kind's current version.
    pub fn encode(record: &Record) -> String {
        match record {
            Record::AssetDefinition(definition) => definition.encode(),
            Record::Metadata(metadata) => encode_metadata(metadata),
            Record::Command(command) => command.encode(),
        }
    }

    /// Decode a record of any known kind.
    ///
    /// The header picks the decoder. A known kind at a version this codec
    /// does not implement is reported as unsupported rather than unknown.
    pub fn decode(text: &str) -> CodecResult<Record> {
        let (header, _) =
            RecordHeader::parse(text).ok_or_else(|| CodecError::UnknownRecord(text.to_string()))?;
        let kind = header
            .kind()
            .ok_or_else(|| CodecError::UnknownRecord(text.to_string()))?;

        debug!(kind = kind.name(), version = header.version, "decoding record");

        if !kind.supported_versions().contains(&header.version) {
            return Err(CodecError::UnsupportedVersion {
                kind: kind.name(),
                version: header.version,
            });
        }
        match kind {
            RecordKind::AssetDefinition => AssetDefinition::decode(text).map(Record::AssetDefinition),
            RecordKind::Metadata => decode_metadata(text).map(Record::Metadata),
            RecordKind::TransferOwnership => CommandDescriptor::decode(text).map(Record::Command),
        }
    }
}
