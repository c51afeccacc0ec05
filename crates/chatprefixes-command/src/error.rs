//! Command failures and the text shown for them.

use chatprefixes_protocol::{Component, NamedColor};
use chatprefixes_registry::StoreError;

/// Why a command was refused.
///
/// Each variant's `Display` text is the message shown to the invoker.
/// None of them change any state.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The console (or another non-player) tried to run the command.
    #[error("Only players may use this command!")]
    PlayersOnly,

    /// The invoker isn't privileged.
    #[error("You must be an operator to use this command!")]
    PermissionDenied,

    /// Nobody by that name is online.
    #[error("{0} is not online! It is suggested you remove them manually via the config file.")]
    TargetOffline(String),

    /// Wrong number of arguments (including the target).
    #[error("Incorrect number of arguments provided! Must be {expected}")]
    InvalidArgumentCount { expected: usize, got: usize },

    /// The colour isn't `#RRGGBB`.
    #[error("Invalid colour has been provided! Must be in hexadecimal format (#ff0000)!")]
    InvalidColor(String),

    /// The target already has a prefix.
    #[error("{0} already has a prefix! Remove the one they currently have before assigning another one")]
    AlreadyAssigned(String),

    /// The target has no prefix to remove.
    #[error("{0} does not currently have a prefix assigned!")]
    Unassigned(String),

    /// The label isn't one of ours.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The change could not be persisted, so it was not applied.
    #[error("The prefix change could not be saved; nothing was changed.")]
    StoreFailed(#[source] StoreError),
}

impl CommandError {
    /// The message to send back to the invoker, in red.
    pub fn to_component(&self) -> Component {
        Component::text(self.to_string()).color(NamedColor::Red)
    }
}
