//! Error types for the protocol layer.
//!
//! Everything here is recoverable: a bad colour or border is reported to
//! whoever supplied it, and a codec failure is reported to the store.

/// Errors that can occur while validating or (de)serializing prefix data.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The colour is not of the form `#RRGGBB`.
    #[error("invalid colour {0:?}: expected hexadecimal #RRGGBB")]
    InvalidColor(String),

    /// The string is not a valid player UUID.
    #[error("invalid player id {0:?}")]
    InvalidPlayerId(String),

    /// The border setting holds fewer than two characters.
    #[error("prefix border {0:?} is shorter than 2 characters")]
    BorderTooShort(String),

    /// Serializing the document to YAML failed.
    #[cfg(feature = "yaml")]
    #[error("yaml encode failed: {0}")]
    YamlEncode(serde_yaml::Error),

    /// The bytes are not a valid YAML document of the expected shape.
    #[cfg(feature = "yaml")]
    #[error("yaml decode failed: {0}")]
    YamlDecode(serde_yaml::Error),

    /// Serializing the document to JSON failed.
    #[cfg(feature = "json")]
    #[error("json encode failed: {0}")]
    JsonEncode(serde_json::Error),

    /// The bytes are not a valid JSON document of the expected shape.
    #[cfg(feature = "json")]
    #[error("json decode failed: {0}")]
    JsonDecode(serde_json::Error),
}
