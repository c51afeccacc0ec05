//! Chat events and the audiences that receive them.

use std::fmt;
use std::sync::Arc;

use chatprefixes_protocol::{Component, PlayerId};
use tokio::sync::mpsc;

/// Anything that can be shown a chat message: a player, the console, a
/// log sink.
pub trait Audience: Send + Sync {
    fn send_message(&self, message: &Component);
}

/// A connected player's outbound channel is an audience: messages are
/// queued for their connection task to write out.
impl Audience for mpsc::UnboundedSender<Component> {
    fn send_message(&self, message: &Component) {
        // A closed channel means the player just left; nothing to do.
        let _ = self.send(message.clone());
    }
}

/// One outgoing chat message, before delivery.
///
/// Listeners may cancel it; a cancelled event is not delivered by the
/// dispatcher, so whoever cancels is responsible for any replacement.
/// A listener that delivers a replacement through
/// [`replace`](Self::replace) makes the cancel final: later listeners can
/// no longer un-cancel the event.
pub struct ChatEvent {
    pub sender: PlayerId,
    pub sender_name: String,
    /// The message as typed, legacy formatting codes included.
    pub message: String,
    /// Everyone the host would deliver this message to.
    pub viewers: Vec<Arc<dyn Audience>>,
    cancelled: bool,
    replaced: bool,
}

impl ChatEvent {
    pub fn new(
        sender: PlayerId,
        sender_name: impl Into<String>,
        message: impl Into<String>,
        viewers: Vec<Arc<dyn Audience>>,
    ) -> Self {
        Self {
            sender,
            sender_name: sender_name.into(),
            message: message.into(),
            viewers,
            cancelled: false,
            replaced: false,
        }
    }

    /// Always `true` once the event has been [replaced](Self::replace).
    pub fn is_cancelled(&self) -> bool {
        self.cancelled || self.replaced
    }

    /// Has no effect on a replaced event.
    pub fn set_cancelled(&mut self, cancelled: bool) {
        if self.replaced && !cancelled {
            tracing::debug!(sender = %self.sender, "ignoring un-cancel of a replaced chat event");
            return;
        }
        self.cancelled = cancelled;
    }

    /// Whether a listener already delivered a replacement.
    pub fn is_replaced(&self) -> bool {
        self.replaced
    }

    /// Delivers `message` to every viewer in place of the original and
    /// cancels the event for good.
    ///
    /// Returns `false` without delivering anything if the event was
    /// already replaced, so viewers never get two copies.
    pub fn replace(&mut self, message: &Component) -> bool {
        if self.replaced {
            return false;
        }
        self.replaced = true;
        self.cancelled = true;
        self.deliver(message);
        true
    }

    /// Sends `message` to every viewer of this event.
    pub fn deliver(&self, message: &Component) {
        for viewer in &self.viewers {
            viewer.send_message(message);
        }
    }
}

impl fmt::Debug for ChatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatEvent")
            .field("sender", &self.sender)
            .field("sender_name", &self.sender_name)
            .field("message", &self.message)
            .field("viewers", &self.viewers.len())
            .field("cancelled", &self.cancelled)
            .field("replaced", &self.replaced)
            .finish()
    }
}
