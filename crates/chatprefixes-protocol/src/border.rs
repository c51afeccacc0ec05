//! The delimiter pair wrapped around tag text.

use std::fmt;

use crate::ProtocolError;

/// The border used when the configured one is missing or malformed.
pub const DEFAULT_BORDER: &str = "[]";

/// Start and end characters wrapped around a tag, e.g. `[` and `]`.
///
/// Always holds exactly one start and one end character; malformed raw
/// settings never make it past [`BorderPair::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderPair {
    pub start: char,
    pub end: char,
}

impl Default for BorderPair {
    fn default() -> Self {
        Self {
            start: '[',
            end: ']',
        }
    }
}

impl BorderPair {
    /// Takes the first two characters of `raw`. Anything after them is
    /// ignored.
    ///
    /// # Errors
    /// Returns [`ProtocolError::BorderTooShort`] if `raw` has fewer than
    /// two characters.
    pub fn try_parse(raw: &str) -> Result<Self, ProtocolError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(ProtocolError::BorderTooShort(raw.to_string())),
        }
    }

    /// Like [`try_parse`](Self::try_parse), but falls back to the default
    /// pair (with a warning) instead of failing.
    pub fn parse(raw: &str) -> Self {
        Self::try_parse(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "resorting to default prefix border");
            Self::default()
        })
    }

    /// Wraps `tag` in the border: `[` + `VIP` + `]`.
    pub fn wrap(&self, tag: &str) -> String {
        let mut out = String::with_capacity(tag.len() + 8);
        out.push(self.start);
        out.push_str(tag);
        out.push(self.end);
        out
    }
}

impl fmt::Display for BorderPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}
