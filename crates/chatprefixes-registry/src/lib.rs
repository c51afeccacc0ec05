//! The prefix registry for ChatPrefixes.
//!
//! [`PrefixRegistry`] is the single in-memory source of truth for who
//! has which tag. Every successful add/remove is written through to a
//! [`PrefixStore`] before it becomes visible, and [`PrefixRegistry::reload`]
//! rebuilds the whole map from the store.
//!
//! # How it fits in the stack
//!
//! ```text
//! Command / Chat layers (above)  ← add/remove, lookup
//!     ↕
//! Registry (this crate)          ← PlayerId → PrefixInfo, write-through
//!     ↕
//! PrefixStore                    ← YAML file, in-memory, or host-supplied
//! ```

mod error;
mod file;
mod registry;
mod store;

pub use error::{RegistryError, StoreError};
pub use file::{FileStore, YamlFileStore};
pub use registry::{PrefixRegistry, ReloadReport};
pub use store::{MemoryStore, PrefixStore};
