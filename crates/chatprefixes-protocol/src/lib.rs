//! Shared data types for ChatPrefixes.
//!
//! This crate defines everything the other layers agree on:
//!
//! - **Identity and prefix data** ([`PlayerId`], [`PrefixInfo`]): who
//!   has a tag, and what it looks like.
//! - **Colours and borders** ([`HexColor`], [`BorderPair`]): validated
//!   forms of the raw strings administrators type or hand-edit.
//! - **Chat text** ([`Component`]): the coloured message model handed to
//!   the host for delivery.
//! - **Persisted document** ([`PrefixDocument`]) and the [`Codec`] trait
//!   that turns it into bytes.
//!
//! # Architecture
//!
//! ```text
//! Store (bytes) → Protocol (PrefixDocument) → Registry (PlayerId → PrefixInfo)
//! ```

mod border;
mod codec;
mod color;
mod document;
mod error;
mod text;
mod types;

pub use border::{BorderPair, DEFAULT_BORDER};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
#[cfg(feature = "yaml")]
pub use codec::YamlCodec;
pub use color::{HexColor, NamedColor, TextColor};
pub use document::{PrefixDocument, StoredPrefix};
pub use error::ProtocolError;
pub use text::{Component, TextSegment};
pub use types::{PlayerId, PrefixInfo};
