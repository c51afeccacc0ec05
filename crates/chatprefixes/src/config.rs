//! Service configuration.

use std::path::PathBuf;

use chatprefixes_protocol::{Codec, YamlCodec};
use serde::{Deserialize, Serialize};

use crate::ChatPrefixesError;

/// How ChatPrefixes is wired into the host.
///
/// The border itself is not here: it lives in the prefix store
/// (`prefix-border`) next to the prefixes, where administrators edit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChatPrefixesConfig {
    /// Where the YAML prefix store lives. Created with defaults if missing.
    pub store_path: PathBuf,

    /// Capacity of the host event channel.
    pub event_buffer: usize,

    /// Write the store once more when the service stops.
    pub save_on_shutdown: bool,
}

impl Default for ChatPrefixesConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("chatprefixes.yml"),
            event_buffer: 256,
            save_on_shutdown: true,
        }
    }
}

impl ChatPrefixesConfig {
    /// Parses a YAML config. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ChatPrefixesError> {
        let config: Self = YamlCodec.decode(yaml.as_bytes())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChatPrefixesError> {
        if self.event_buffer == 0 {
            return Err(ChatPrefixesError::InvalidConfig(
                "event-buffer must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChatPrefixesConfig::default();
        assert_eq!(config.store_path, PathBuf::from("chatprefixes.yml"));
        assert_eq!(config.event_buffer, 256);
        assert!(config.save_on_shutdown);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ChatPrefixesConfig::from_yaml_str("store-path: data/tags.yml\n").unwrap();
        assert_eq!(config.store_path, PathBuf::from("data/tags.yml"));
        assert_eq!(config.event_buffer, 256);
    }

    #[test]
    fn test_zero_buffer_is_rejected() {
        let err = ChatPrefixesConfig::from_yaml_str("event-buffer: 0\n").unwrap_err();
        assert!(matches!(err, ChatPrefixesError::InvalidConfig(_)));
    }
}
