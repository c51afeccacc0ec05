//! A minimal chat text model.
//!
//! A [`Component`] is an ordered run of [`TextSegment`]s, each with an
//! optional colour. Hosts with rich chat render the segments directly;
//! plain-text hosts can use [`Component::to_legacy_string`].

use serde::{Deserialize, Serialize};

use crate::TextColor;

/// The section sign that introduces a legacy formatting code.
const SECTION: char = '§';

/// One run of text sharing a colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub color: Option<TextColor>,
    /// `true` if `text` is player-typed legacy text whose inline
    /// formatting codes must be kept verbatim.
    pub legacy: bool,
}

/// A chat message made of coloured segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    segments: Vec<TextSegment>,
}

impl Component {
    /// A single uncoloured segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            segments: vec![TextSegment {
                text: text.into(),
                color: None,
                legacy: false,
            }],
        }
    }

    /// A single segment of player text carrying its own formatting codes.
    pub fn legacy_text(text: impl Into<String>) -> Self {
        Self {
            segments: vec![TextSegment {
                text: text.into(),
                color: None,
                legacy: true,
            }],
        }
    }

    /// Colours every segment that doesn't have a colour yet.
    pub fn color(mut self, color: impl Into<TextColor>) -> Self {
        let color = color.into();
        for segment in &mut self.segments {
            segment.color.get_or_insert(color);
        }
        self
    }

    /// Appends another component's segments after this one's.
    pub fn append(mut self, other: Component) -> Self {
        self.segments.extend(other.segments);
        self
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    /// The text with all colour information dropped.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Serializes to a section-sign string: `§x§r§r§g§g§b§b` before hex
    /// coloured segments, the single-letter code before named ones, and
    /// `§r` when an uncoloured segment follows a coloured one.
    pub fn to_legacy_string(&self) -> String {
        let mut out = String::new();
        let mut coloured = false;

        for segment in &self.segments {
            match segment.color {
                Some(TextColor::Named(named)) => {
                    push_code(&mut out, named.legacy_code());
                    coloured = true;
                }
                Some(TextColor::Hex(hex)) => {
                    push_code(&mut out, 'x');
                    for digit in hex.to_string().chars().skip(1) {
                        push_code(&mut out, digit);
                    }
                    coloured = true;
                }
                None if coloured => {
                    push_code(&mut out, 'r');
                    coloured = false;
                }
                None => {}
            }
            out.push_str(&segment.text);
        }

        out
    }
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

fn push_code(out: &mut String, code: char) {
    out.push(SECTION);
    out.push(code);
}
