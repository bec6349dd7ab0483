use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Characters the record codec uses as delimiters.
///
/// The text records have no escaping, so neither keys nor string values may
/// contain these.
pub const RESERVED_CHARACTERS: [char; 3] = [',', '.', ':'];

/// A single metadata value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Key/value metadata attached to an asset.
///
/// Keys are unique. Insertion order is kept for encoding, but two
/// collections holding the same pairs compare equal in any order.
/// Re-inserting an existing key replaces its value in place. The serde form
/// is a list of pairs, and deserializing goes through [`Metadata::insert`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(into = "Vec<(String, MetadataValue)>", from = "Vec<(String, MetadataValue)>")]
pub struct Metadata {
    entries: Vec<(String, MetadataValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fold `other` into `self`; keys in `other` win.
    pub fn merge(&mut self, other: Metadata) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Check every key and value against the codec's delimiters.
    ///
    /// Anything the record decoder produces passes this check.
    pub fn validate(&self) -> Result<(), TypeError> {
        for (key, value) in &self.entries {
            if let Some(character) = find_reserved(key) {
                return Err(TypeError::ReservedCharacter {
                    key: key.clone(),
                    character,
                });
            }
            match value {
                MetadataValue::String(s) => {
                    if let Some(character) = find_reserved(s) {
                        return Err(TypeError::ReservedCharacter {
                            key: key.clone(),
                            character,
                        });
                    }
                }
                MetadataValue::Number(n) if !n.is_finite() => {
                    return Err(TypeError::NonFiniteNumber { key: key.clone() });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// [`validate`](Self::validate), and also require that every value
    /// renders without a delimiter so the pairs can be written as-is.
    pub fn validate_encodable(&self) -> Result<(), TypeError> {
        self.validate()?;
        // A fractional part renders with '.', the pair separator.
        match self
            .entries
            .iter()
            .find(|(_, value)| matches!(value, MetadataValue::Number(n) if n.fract() != 0.0))
        {
            Some((key, _)) => Err(TypeError::ReservedCharacter {
                key: key.clone(),
                character: '.',
            }),
            None => Ok(()),
        }
    }
}

fn find_reserved(text: &str) -> Option<char> {
    text.chars().find(|c| RESERVED_CHARACTERS.contains(c))
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

impl From<Vec<(String, MetadataValue)>> for Metadata {
    fn from(pairs: Vec<(String, MetadataValue)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Metadata> for Vec<(String, MetadataValue)> {
    fn from(metadata: Metadata) -> Self {
        metadata.entries
    }
}
