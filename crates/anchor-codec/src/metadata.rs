use anchor_types::{Metadata, MetadataValue};

use crate::error::{CodecError, CodecResult};
use crate::record::METADATA_PREFIX;

const PAIR_SEPARATOR: &str = ".";
const KEY_VALUE_SEPARATOR: &str = ",";

/// Recover a typed value from its text form.
///
/// The order matters and is part of the format: a finite numeric literal
/// becomes a number, then `true`/`false` in any case become booleans, and
/// anything else stays a string.
pub fn infer_value(raw: &str) -> MetadataValue {
    if let Some(number) = parse_number(raw) {
        MetadataValue::Number(number)
    } else if raw.eq_ignore_ascii_case("true") {
        MetadataValue::Boolean(true)
    } else if raw.eq_ignore_ascii_case("false") {
        MetadataValue::Boolean(false)
    } else {
        MetadataValue::String(raw.to_string())
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Encode metadata as a single `metadata(1):` record.
///
/// Expects metadata that passed `Metadata::validate_encodable`; nothing is
/// escaped here.
pub fn encode_metadata(metadata: &Metadata) -> String {
    let pairs: Vec<String> = metadata
        .iter()
        .map(|(key, value)| format!("{key}{KEY_VALUE_SEPARATOR}{value}"))
        .collect();
    format!("{METADATA_PREFIX}{}", pairs.join(PAIR_SEPARATOR))
}

/// Decode one `metadata(1):` record.
///
/// Every pair must split into exactly one key and one value; anything else
/// is rejected rather than guessed at.
pub fn decode_metadata(text: &str) -> CodecResult<Metadata> {
    let payload = text
        .strip_prefix(METADATA_PREFIX)
        .ok_or_else(|| CodecError::InvalidPrefix {
            expected: METADATA_PREFIX,
            found: text.to_string(),
        })?;

    let mut metadata = Metadata::new();
    for pair in payload.split(PAIR_SEPARATOR) {
        let mut parts = pair.split(KEY_VALUE_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                metadata.insert(key, infer_value(value));
            }
            _ => return Err(CodecError::MalformedRecord(text.to_string())),
        }
    }
    Ok(metadata)
}

/// Merge every metadata record among `messages`, in the order given.
///
/// Messages without the metadata prefix are skipped. Later records
/// overwrite keys set by earlier ones.
pub fn extract_metadata<'a, I>(messages: I) -> CodecResult<Metadata>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut merged = Metadata::new();
    for message in messages
        .into_iter()
        .filter(|m| m.starts_with(METADATA_PREFIX))
    {
        merged.merge(decode_metadata(message)?);
    }
    Ok(merged)
}
