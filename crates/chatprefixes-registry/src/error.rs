//! Error types for the registry layer.

use std::path::PathBuf;

use chatprefixes_protocol::{PlayerId, ProtocolError};

/// Errors raised by a [`PrefixStore`](crate::PrefixStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store i/o failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] ProtocolError),
}

/// Errors returned by [`PrefixRegistry`](crate::PrefixRegistry) operations.
///
/// None of these leave the registry changed: a failed add or remove
/// touches neither the in-memory map nor the store.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The player already has a prefix.
    #[error("player {0} already has a prefix")]
    AlreadyExists(PlayerId),

    /// The player has no prefix to remove.
    #[error("player {0} has no prefix")]
    NotFound(PlayerId),

    /// The colour is not `#RRGGBB`.
    #[error(transparent)]
    InvalidColor(ProtocolError),

    /// The store rejected the write (or read, on reload).
    #[error("prefix store failed: {0}")]
    Store(#[from] StoreError),
}
