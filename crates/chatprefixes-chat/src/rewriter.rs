//! Replaces chat from prefixed players with a tagged message.

use std::sync::Arc;

use chatprefixes_protocol::{BorderPair, Component, NamedColor};
use chatprefixes_registry::PrefixRegistry;

use crate::{ChatEvent, ChatListener, ListenerPriority};

/// Tags chat messages from players who have a prefix.
///
/// For a sender with `{ "VIP", "#ff0000" }` and the default border, the
/// message `hi` from `Steve` becomes:
///
/// ```text
/// [VIP] <Steve> hi
/// ^^^^^ #ff0000   (rest white; the message keeps its own formatting codes)
/// ```
///
/// Runs at [`ListenerPriority::Lowest`] so the replacement is decided
/// before any other listener can transform or cancel the message.
pub struct ChatRewriter {
    registry: Arc<PrefixRegistry>,
    border: BorderPair,
}

impl ChatRewriter {
    pub fn new(registry: Arc<PrefixRegistry>, border: BorderPair) -> Self {
        Self { registry, border }
    }

    /// Builds the tagged message for the event's sender, or `None` if
    /// they have no prefix and the message should pass through unchanged.
    pub fn rewrite(&self, event: &ChatEvent) -> Option<Component> {
        let sender = &event.sender;
        let info = self.registry.lookup(sender)?;

        let mut tag = Component::text(self.border.wrap(&info.tag_name));
        match info.color() {
            Some(color) => tag = tag.color(color),
            None => {
                tracing::warn!(
                    player_id = %sender,
                    colour = %info.colour,
                    "stored prefix colour is not #RRGGBB; sending tag uncoloured"
                );
            }
        }

        Some(
            tag.append(
                Component::text(format!(" <{}> ", event.sender_name))
                    .append(Component::legacy_text(event.message.clone()))
                    .color(NamedColor::White),
            ),
        )
    }
}

impl ChatListener for ChatRewriter {
    fn priority(&self) -> ListenerPriority {
        ListenerPriority::Lowest
    }

    fn on_chat(&self, event: &mut ChatEvent) {
        if event.is_replaced() {
            return;
        }
        let Some(tagged) = self.rewrite(event) else {
            return;
        };

        event.replace(&tagged);
    }
}
