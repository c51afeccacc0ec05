//! Integration tests for the chat rewriter running inside a dispatcher.

use std::sync::Arc;

use chatprefixes_chat::{
    Audience, ChatDispatcher, ChatEvent, ChatListener, ChatRewriter, Delivery, ListenerPriority,
};
use chatprefixes_protocol::{
    BorderPair, Component, HexColor, NamedColor, PlayerId, PrefixDocument, StoredPrefix,
    TextColor,
};
use chatprefixes_registry::{MemoryStore, PrefixRegistry};
use tokio::sync::mpsc;
use uuid::Uuid;

// =========================================================================
// Helpers
// =========================================================================

fn pid(n: u128) -> PlayerId {
    PlayerId(Uuid::from_u128(n))
}

fn registry_with(entries: &[(PlayerId, &str, &str)]) -> Arc<PrefixRegistry> {
    let mut doc = PrefixDocument::with_defaults();
    for (id, tag, colour) in entries {
        doc.prefixes.insert(id.to_key(), StoredPrefix::new(*tag, *colour));
    }
    let registry = Arc::new(PrefixRegistry::new(MemoryStore::new(doc)));
    registry.reload().unwrap();
    registry
}

fn dispatcher(registry: Arc<PrefixRegistry>, border: BorderPair) -> ChatDispatcher {
    let mut dispatcher = ChatDispatcher::new();
    dispatcher.register(Arc::new(ChatRewriter::new(registry, border)));
    dispatcher
}

/// An event from `sender` named `P1` with no viewers.
fn chat(sender: PlayerId, message: &str) -> ChatEvent {
    ChatEvent::new(sender, "P1", message, Vec::new())
}

/// A listener that tries to undo any cancel before it.
struct Uncancel(ListenerPriority);

impl ChatListener for Uncancel {
    fn priority(&self) -> ListenerPriority {
        self.0
    }

    fn on_chat(&self, event: &mut ChatEvent) {
        event.set_cancelled(false);
    }
}

type Inbox = mpsc::UnboundedReceiver<Component>;

fn viewers(n: usize) -> (Vec<Arc<dyn Audience>>, Vec<Inbox>) {
    (0..n)
        .map(|_| {
            let (tx, rx) = mpsc::unbounded_channel();
            (Arc::new(tx) as Arc<dyn Audience>, rx)
        })
        .unzip()
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_unprefixed_sender_passes_through() {
    let registry = registry_with(&[(pid(1), "VIP", "#ff0000")]);
    let dispatcher = dispatcher(registry, BorderPair::default());
    let (audience, mut inboxes) = viewers(1);

    let delivery = dispatcher.dispatch(ChatEvent::new(pid(2), "Alex", "hi", audience));

    assert_eq!(delivery, Delivery::Default);
    let msg = inboxes[0].try_recv().unwrap();
    assert_eq!(msg.plain_text(), "<Alex> hi");
    assert!(inboxes[0].try_recv().is_err());
}

#[test]
fn test_prefixed_sender_is_rewritten() {
    let registry = registry_with(&[(pid(1), "VIP", "#ff0000")]);
    let dispatcher = dispatcher(registry, BorderPair::default());
    let (audience, mut inboxes) = viewers(1);

    let delivery = dispatcher.dispatch(ChatEvent::new(pid(1), "P1", "hi", audience));

    assert_eq!(delivery, Delivery::Cancelled);
    let msg = inboxes[0].try_recv().unwrap();
    assert_eq!(msg.plain_text(), "[VIP] <P1> hi");

    let segments = msg.segments();
    assert_eq!(segments[0].text, "[VIP]");
    assert_eq!(segments[0].color, Some(TextColor::Hex(HexColor::new(255, 0, 0))));
    assert!(segments[1..]
        .iter()
        .all(|s| s.color == Some(TextColor::Named(NamedColor::White))));

    // Exactly one copy: the original was suppressed.
    assert!(inboxes[0].try_recv().is_err());
}

#[test]
fn test_rewrite_reaches_exactly_the_viewer_set() {
    let registry = registry_with(&[(pid(1), "VIP", "#ff0000")]);
    let dispatcher = dispatcher(registry, BorderPair::default());
    let (audience, mut inboxes) = viewers(3);
    let (_, mut outsider) = viewers(1);

    dispatcher.dispatch(ChatEvent::new(pid(1), "P1", "hi", audience));

    for inbox in &mut inboxes {
        assert_eq!(inbox.try_recv().unwrap().plain_text(), "[VIP] <P1> hi");
    }
    assert!(outsider[0].try_recv().is_err());
}

#[test]
fn test_legacy_codes_in_message_are_kept() {
    let registry = registry_with(&[(pid(1), "VIP", "#ff0000")]);
    let rewriter = ChatRewriter::new(registry, BorderPair::default());

    let msg = rewriter.rewrite(&chat(pid(1), "§lbold")).unwrap();
    let last = msg.segments().last().unwrap();
    assert_eq!(last.text, "§lbold");
    assert!(last.legacy);
    assert!(msg.to_legacy_string().ends_with("§f§lbold"));
}

#[test]
fn test_custom_border() {
    let registry = registry_with(&[(pid(1), "MOD", "#00ff00")]);
    let rewriter = ChatRewriter::new(registry, BorderPair::parse("<>"));

    let msg = rewriter.rewrite(&chat(pid(1), "yo")).unwrap();
    assert_eq!(msg.plain_text(), "<MOD> <P1> yo");
}

#[test]
fn test_malformed_colour_renders_uncoloured_tag() {
    let registry = registry_with(&[(pid(1), "VIP", "crimson")]);
    let rewriter = ChatRewriter::new(registry, BorderPair::default());

    let msg = rewriter.rewrite(&chat(pid(1), "hi")).unwrap();
    assert_eq!(msg.plain_text(), "[VIP] <P1> hi");
    assert_eq!(msg.segments()[0].color, None);
}

#[test]
fn test_registry_changes_are_seen_immediately() {
    let registry = registry_with(&[]);
    let rewriter = ChatRewriter::new(Arc::clone(&registry), BorderPair::default());
    assert!(rewriter.rewrite(&chat(pid(1), "hi")).is_none());

    registry.add(pid(1), "VIP", "#ff0000").unwrap();
    assert!(rewriter.rewrite(&chat(pid(1), "hi")).is_some());

    registry.remove(pid(1)).unwrap();
    assert!(rewriter.rewrite(&chat(pid(1), "hi")).is_none());
}

#[test]
fn test_later_listener_cannot_undo_rewrite() {
    let registry = registry_with(&[(pid(1), "VIP", "#ff0000")]);
    let mut dispatcher = dispatcher(registry, BorderPair::default());
    dispatcher.register(Arc::new(Uncancel(ListenerPriority::Normal)));
    dispatcher.register(Arc::new(Uncancel(ListenerPriority::Monitor)));
    let (audience, mut inboxes) = viewers(1);

    let delivery = dispatcher.dispatch(ChatEvent::new(pid(1), "P1", "hi", audience));

    assert_eq!(delivery, Delivery::Cancelled);
    assert_eq!(inboxes[0].try_recv().unwrap().plain_text(), "[VIP] <P1> hi");
    assert!(inboxes[0].try_recv().is_err());
}

#[test]
fn test_second_rewriter_does_not_deliver_again() {
    let registry = registry_with(&[(pid(1), "VIP", "#ff0000")]);
    let mut dispatcher = dispatcher(Arc::clone(&registry), BorderPair::default());
    dispatcher.register(Arc::new(ChatRewriter::new(registry, BorderPair::parse("<>"))));
    let (audience, mut inboxes) = viewers(2);

    dispatcher.dispatch(ChatEvent::new(pid(1), "P1", "hi", audience));

    for inbox in &mut inboxes {
        assert_eq!(inbox.try_recv().unwrap().plain_text(), "[VIP] <P1> hi");
        assert!(inbox.try_recv().is_err());
    }
}

#[test]
fn test_uncancel_still_works_for_plain_cancel() {
    let registry = registry_with(&[]);
    let mut dispatcher = dispatcher(registry, BorderPair::default());
    dispatcher.register(Arc::new(Uncancel(ListenerPriority::High)));
    let (audience, mut inboxes) = viewers(1);

    let mut event = ChatEvent::new(pid(2), "Alex", "hi", audience);
    event.set_cancelled(true);

    assert_eq!(dispatcher.dispatch(event), Delivery::Default);
    assert_eq!(inboxes[0].try_recv().unwrap().plain_text(), "<Alex> hi");
}
