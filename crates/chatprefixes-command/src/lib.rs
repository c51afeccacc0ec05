//! Administrative commands for ChatPrefixes.
//!
//! [`CommandAuthority`] validates and applies `prefix-add` and
//! `prefix-remove` against the registry. The host supplies who is
//! asking ([`Invoker`]) and how to find online players
//! ([`PlayerDirectory`]); this crate never parses a command line.

mod authority;
mod directory;
mod error;

pub use authority::{CommandAuthority, CommandOutcome, PREFIX_ADD, PREFIX_REMOVE};
pub use directory::{Invoker, OnlinePlayer, PlayerDirectory};
pub use error::CommandError;
