//! The persisted store document.
//!
//! The on-disk shape is:
//!
//! ```yaml
//! prefix-border: "[]"
//! prefixes:
//!   550e8400-e29b-41d4-a716-446655440000:
//!     tag-name: VIP
//!     colour: "#ff0000"
//! ```
//!
//! The store is meant to be hand-editable, so decoding is lenient: a
//! scalar of the wrong type becomes its string form, and a field or
//! entry of an unusable shape decodes as missing instead of failing the
//! whole document. Deciding what to do with those gaps is the
//! registry's job.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::DEFAULT_BORDER;

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrefixDocument {
    /// Raw border setting; only the first two characters are used.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prefix_border: Option<String>,

    /// Stored prefixes keyed by the player's UUID string.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub prefixes: BTreeMap<String, StoredPrefix>,
}

impl PrefixDocument {
    /// The document written when no store exists yet.
    pub fn with_defaults() -> Self {
        Self {
            prefix_border: Some(DEFAULT_BORDER.to_string()),
            prefixes: BTreeMap::new(),
        }
    }
}

/// One stored prefix, exactly as found in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoredPrefix {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub colour: Option<String>,
}

impl StoredPrefix {
    pub fn new(tag_name: impl Into<String>, colour: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into()),
            colour: Some(colour.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient decoding
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Entry(StoredPrefix),
    Other(IgnoredAny),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Text(s)) => Some(s),
        Some(RawScalar::Integer(n)) => Some(n.to_string()),
        Some(RawScalar::Float(n)) => Some(n.to_string()),
        Some(RawScalar::Flag(b)) => Some(b.to_string()),
        Some(RawScalar::Other(_)) | None => None,
    })
}

fn lenient_entries<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, StoredPrefix>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, RawEntry>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, entry)| {
            let entry = match entry {
                RawEntry::Entry(stored) => stored,
                RawEntry::Other(_) => StoredPrefix::default(),
            };
            (key, entry)
        })
        .collect())
}
