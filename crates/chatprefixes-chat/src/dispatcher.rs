//! Ordered chat listeners and default delivery.

use std::sync::Arc;

use chatprefixes_protocol::{Component, NamedColor};

use crate::ChatEvent;

/// When a listener runs relative to others. Lower runs first, so
/// `Lowest` gets the first say and `Monitor` sees the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerPriority {
    Lowest,
    Low,
    Normal,
    High,
    Highest,
    Monitor,
}

/// Something that wants to see (and maybe change) chat messages.
///
/// `on_chat` runs on the host's chat path for every message, so it must
/// not block.
pub trait ChatListener: Send + Sync {
    fn priority(&self) -> ListenerPriority {
        ListenerPriority::Normal
    }

    fn on_chat(&self, event: &mut ChatEvent);
}

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// No listener cancelled it; it was delivered in the default format.
    Default,
    /// A listener cancelled it (and possibly delivered a replacement).
    Cancelled,
}

/// Runs chat events through registered listeners in priority order.
#[derive(Default, Clone)]
pub struct ChatDispatcher {
    listeners: Vec<Arc<dyn ChatListener>>,
}

impl ChatDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener. Listeners of equal priority run in registration
    /// order.
    pub fn register(&mut self, listener: Arc<dyn ChatListener>) {
        self.listeners.push(listener);
        self.listeners.sort_by_key(|l| l.priority());
    }

    /// Passes `event` to every listener, then delivers it unless one of
    /// them cancelled it.
    pub fn dispatch(&self, mut event: ChatEvent) -> Delivery {
        for listener in &self.listeners {
            listener.on_chat(&mut event);
        }

        if event.is_cancelled() {
            tracing::trace!(sender = %event.sender, "chat event cancelled by listener");
            return Delivery::Cancelled;
        }

        event.deliver(&default_format(&event));
        Delivery::Default
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// `<name> message`, the way an unmodified message is shown.
pub(crate) fn default_format(event: &ChatEvent) -> Component {
    Component::text(format!("<{}> ", event.sender_name))
        .append(Component::legacy_text(event.message.clone()))
        .color(NamedColor::White)
}
