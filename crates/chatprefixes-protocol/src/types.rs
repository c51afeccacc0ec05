//! Identity and prefix types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{HexColor, ProtocolError};

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// A stable, host-supplied identifier for a player.
///
/// Newtype over a 128-bit UUID so a `PlayerId` can't be confused with
/// any other UUID floating around the host. `#[serde(transparent)]`
/// stores it as the bare UUID string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generates a random (v4) player id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// The canonical string form used as the key in the persisted store:
    /// lowercase and hyphenated.
    pub fn to_key(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PlayerId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ProtocolError::InvalidPlayerId(s.to_string()))
    }
}

impl From<Uuid> for PlayerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

// ---------------------------------------------------------------------------
// PrefixInfo
// ---------------------------------------------------------------------------

/// The tag a player displays in front of their name.
///
/// `colour` is kept as the raw string it was stored with. Entries created
/// through the registry are always valid `#RRGGBB`, but entries reloaded
/// from a hand-edited store are passed through untouched, so renderers
/// must go through [`PrefixInfo::color`] rather than assume validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixInfo {
    /// The label text, without border characters.
    pub tag_name: String,
    /// The raw colour string, normally `#RRGGBB`.
    pub colour: String,
}

impl PrefixInfo {
    pub fn new(tag_name: impl Into<String>, colour: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            colour: colour.into(),
        }
    }

    /// Parses the stored colour, returning `None` if it is malformed.
    pub fn color(&self) -> Option<HexColor> {
        HexColor::parse(&self.colour).ok()
    }
}
