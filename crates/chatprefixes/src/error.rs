//! Unified error type for ChatPrefixes.

use chatprefixes_command::CommandError;
use chatprefixes_protocol::ProtocolError;
use chatprefixes_registry::{RegistryError, StoreError};

/// Top-level error wrapping every layer's errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors, so host
/// code only has to deal with this one type.
#[derive(Debug, thiserror::Error)]
pub enum ChatPrefixesError {
    /// Validation or (de)serialization of prefix data failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The persisted store couldn't be opened, read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A command was refused.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The host event loop has stopped.
    #[error("chat prefix service is not running")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err: ChatPrefixesError = ProtocolError::InvalidColor("red".into()).into();
        assert!(matches!(err, ChatPrefixesError::Protocol(_)));
        assert!(err.to_string().contains("red"));
    }

    #[test]
    fn test_from_command_error_keeps_user_text() {
        let err: ChatPrefixesError = CommandError::PermissionDenied.into();
        assert_eq!(err.to_string(), "You must be an operator to use this command!");
    }

    #[test]
    fn test_from_registry_error() {
        let id = chatprefixes_protocol::PlayerId::new_v4();
        let err: ChatPrefixesError = RegistryError::NotFound(id).into();
        assert!(matches!(err, ChatPrefixesError::Registry(_)));
    }
}
