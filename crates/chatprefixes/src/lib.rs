//! # ChatPrefixes
//!
//! Persistent, coloured chat tags for multiplayer game servers.
//!
//! An administrator assigns a player a tag (`prefix-add Steve VIP #ff0000`);
//! from then on every chat message Steve sends is shown as
//! `[VIP] <Steve> …` with the tag in red. Tags survive restarts through a
//! YAML store.
//!
//! The host game server stays in charge of sessions, permissions and
//! delivery. It talks to ChatPrefixes through three narrow seams:
//!
//! - a [`PlayerDirectory`](chatprefixes_command::PlayerDirectory) to
//!   resolve player names,
//! - [`ChatEvent`](chatprefixes_chat::ChatEvent)s for outgoing chat,
//! - [`HostEvent`]s (or a [`HostHandle`]) for commands and reloads.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatprefixes::prelude::*;
//!
//! # struct Roster;
//! # impl PlayerDirectory for Roster {
//! #     fn resolve(&self, _name: &str) -> Option<OnlinePlayer> { None }
//! # }
//! # async fn start() -> Result<(), ChatPrefixesError> {
//! let prefixes = ChatPrefixesBuilder::new()
//!     .config(ChatPrefixesConfig::default())
//!     .build(Roster)?;
//! let (handle, task) = prefixes.start();
//! // hand `handle` to the host's chat and command hooks...
//! handle.shutdown().await?;
//! # let _ = task.await;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::ChatPrefixesConfig;
pub use error::ChatPrefixesError;
pub use handler::{HostEvent, HostHandle};
pub use server::{ChatPrefixes, ChatPrefixesBuilder};

/// Everything a host integration usually needs.
pub mod prelude {
    pub use crate::{
        ChatPrefixes, ChatPrefixesBuilder, ChatPrefixesConfig, ChatPrefixesError, HostEvent,
        HostHandle,
    };
    pub use chatprefixes_chat::{
        Audience, ChatDispatcher, ChatEvent, ChatListener, ChatRewriter, Delivery,
        ListenerPriority,
    };
    pub use chatprefixes_command::{
        CommandAuthority, CommandError, CommandOutcome, Invoker, OnlinePlayer,
        PlayerDirectory, PREFIX_ADD, PREFIX_REMOVE,
    };
    pub use chatprefixes_protocol::{
        BorderPair, Component, HexColor, NamedColor, PlayerId, PrefixInfo, TextColor,
    };
    pub use chatprefixes_registry::{
        MemoryStore, PrefixRegistry, PrefixStore, RegistryError, ReloadReport, YamlFileStore,
    };
}
