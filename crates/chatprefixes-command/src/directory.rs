//! The host-facing side of command handling.
//!
//! ChatPrefixes doesn't own player sessions or permissions. Instead it
//! defines the [`PlayerDirectory`] trait: the host implements it over
//! whatever it uses to track who is online, and describes each command
//! sender as an [`Invoker`].

use chatprefixes_protocol::PlayerId;

/// A player the host currently has connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlinePlayer {
    pub id: PlayerId,
    /// Display name, used in confirmations and chat.
    pub name: String,
}

impl OnlinePlayer {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Who ran a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invoker {
    /// An in-game player. `privileged` is the host's answer to "may this
    /// player administer prefixes?" (operator status, a permission node,
    /// etc.).
    Player {
        player: OnlinePlayer,
        privileged: bool,
    },

    /// The server console or another non-player sender.
    Console,
}

impl Invoker {
    pub fn player(player: OnlinePlayer, privileged: bool) -> Self {
        Self::Player { player, privileged }
    }
}

/// Resolves player names to connected players.
///
/// `Send + Sync + 'static` because commands run on blocking worker
/// threads, away from the task that received them.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use chatprefixes_command::{OnlinePlayer, PlayerDirectory};
///
/// struct Roster(HashMap<String, OnlinePlayer>);
///
/// impl PlayerDirectory for Roster {
///     fn resolve(&self, name: &str) -> Option<OnlinePlayer> {
///         self.0.get(&name.to_lowercase()).cloned()
///     }
/// }
/// ```
pub trait PlayerDirectory: Send + Sync + 'static {
    /// Finds an online player by name, or `None` if nobody by that name
    /// is connected.
    fn resolve(&self, name: &str) -> Option<OnlinePlayer>;
}

impl<D: PlayerDirectory + ?Sized> PlayerDirectory for std::sync::Arc<D> {
    fn resolve(&self, name: &str) -> Option<OnlinePlayer> {
        (**self).resolve(name)
    }
}
