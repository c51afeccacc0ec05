//! Codecs for the persisted store.
//!
//! A codec turns serde types into bytes and back. The store layer is
//! generic over [`Codec`], so the document format can change without
//! touching the registry. [`YamlCodec`] (feature `yaml`, on by default)
//! matches the hand-editable format administrators expect;
//! [`JsonCodec`] (feature `json`) is there for hosts that keep their
//! settings as JSON.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes values to bytes and decodes them back.
///
/// `Send + Sync + 'static` because stores holding a codec are shared
/// between the chat path and command handlers.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// YamlCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_yaml`.
///
/// ```rust
/// use chatprefixes_protocol::{Codec, PrefixDocument, YamlCodec};
///
/// let doc: PrefixDocument = YamlCodec
///     .decode(b"prefix-border: '<>'\nprefixes: {}\n")
///     .unwrap();
/// assert_eq!(doc.prefix_border.as_deref(), Some("<>"));
/// ```
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

#[cfg(feature = "yaml")]
impl Codec for YamlCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(ProtocolError::YamlEncode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_yaml::from_slice(data).map_err(ProtocolError::YamlDecode)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`, pretty-printed so the file stays
/// editable.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec_pretty(value).map_err(ProtocolError::JsonEncode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::JsonDecode)
    }
}

#[cfg(all(test, feature = "yaml"))]
mod tests {
    use super::*;
    use crate::{PrefixDocument, StoredPrefix};

    const KEY: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_yaml_reads_hand_written_store() {
        let yaml = format!(
            "prefix-border: '[]'\nprefixes:\n  {KEY}:\n    tag-name: VIP\n    colour: '#ff0000'\n"
        );
        let doc: PrefixDocument = YamlCodec.decode(yaml.as_bytes()).unwrap();
        assert_eq!(doc.prefix_border.as_deref(), Some("[]"));
        assert_eq!(doc.prefixes[KEY], StoredPrefix::new("VIP", "#ff0000"));
    }

    #[test]
    fn test_yaml_written_colour_survives_reading() {
        // An unquoted `#` would start a YAML comment; the encoder must quote it.
        let mut doc = PrefixDocument::with_defaults();
        doc.prefixes.insert(KEY.into(), StoredPrefix::new("VIP", "#ff0000"));

        let bytes = YamlCodec.encode(&doc).unwrap();
        let back: PrefixDocument = YamlCodec.decode(&bytes).unwrap();
        assert_eq!(back, doc);
        assert!(String::from_utf8(bytes).unwrap().contains("tag-name: VIP"));
    }

    #[test]
    fn test_yaml_lenient_fields() {
        let yaml = format!(
            "prefixes:\n  {KEY}:\n    tag-name: 42\n    colour: [1, 2]\n  other: just-a-string\n"
        );
        let doc: PrefixDocument = YamlCodec.decode(yaml.as_bytes()).unwrap();

        assert_eq!(doc.prefix_border, None);
        assert_eq!(doc.prefixes[KEY].tag_name.as_deref(), Some("42"));
        assert_eq!(doc.prefixes[KEY].colour, None);
        assert_eq!(doc.prefixes["other"], StoredPrefix::default());
    }

    #[test]
    fn test_yaml_unquoted_hash_reads_as_missing() {
        let yaml = format!("prefixes:\n  {KEY}:\n    tag-name: VIP\n    colour: #ff0000\n");
        let doc: PrefixDocument = YamlCodec.decode(yaml.as_bytes()).unwrap();
        assert_eq!(doc.prefixes[KEY].colour, None);
    }

    #[test]
    fn test_yaml_rejects_non_document() {
        let result: Result<PrefixDocument, _> = YamlCodec.decode(b"- just\n- a list\n");
        assert!(matches!(result, Err(ProtocolError::YamlDecode(_))));
    }
}
