/// Prefix of a version 1 asset-definition record.
pub const ASSET_PREFIX: &str = "asset(1):";
/// Prefix of a version 1 metadata record.
pub const METADATA_PREFIX: &str = "metadata(1):";
/// Prefix of a version 1 ownership-transfer command record.
pub const TRANSFER_OWNERSHIP_PREFIX: &str = "asset_command(transfer_ownership,1):";

/// The kinds of record the codec understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    AssetDefinition,
    Metadata,
    TransferOwnership,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::AssetDefinition,
        RecordKind::Metadata,
        RecordKind::TransferOwnership,
    ];

    /// Leading name in the record header.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::AssetDefinition => "asset",
            Self::Metadata => "metadata",
            Self::TransferOwnership => "asset_command",
        }
    }

    /// Header qualifier preceding the version, if any.
    pub const fn qualifier(self) -> Option<&'static str> {
        match self {
            Self::TransferOwnership => Some("transfer_ownership"),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::AssetDefinition => "asset definition",
            Self::Metadata => "metadata",
            Self::TransferOwnership => "transfer ownership",
        }
    }

    /// Versions this codec can decode.
    pub const fn supported_versions(self) -> &'static [u32] {
        &[1]
    }
}

/// Parsed `tag(qualifier,...,version):` header of a record.
///
/// Used to route a record to the decoder for its kind and version. The
/// decoders themselves still match their exact canonical prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordHeader<'a> {
    pub tag: &'a str,
    pub qualifiers: Vec<&'a str>,
    pub version: u32,
}

impl<'a> RecordHeader<'a> {
    /// Split a record into its header and payload.
    ///
    /// Returns `None` when the text does not start with a header.
    pub fn parse(text: &'a str) -> Option<(Self, &'a str)> {
        let open = text.find('(')?;
        let close = open + text[open..].find("):")?;
        let tag = &text[..open];
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
            return None;
        }

        let mut params: Vec<&str> = text[open + 1..close].split(',').collect();
        let version = params.pop()?.parse().ok()?;
        let header = Self {
            tag,
            qualifiers: params,
            version,
        };
        Some((header, &text[close + 2..]))
    }

    /// The record kind this header names, regardless of version.
    pub fn kind(&self) -> Option<RecordKind> {
        let qualifier = match self.qualifiers.as_slice() {
            [] => None,
            [q] => Some(*q),
            _ => return None,
        };
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == self.tag && kind.qualifier() == qualifier)
    }
}
