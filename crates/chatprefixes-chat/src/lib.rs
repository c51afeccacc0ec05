//! The chat side of ChatPrefixes.
//!
//! The host turns each outgoing chat message into a [`ChatEvent`] and
//! runs it through a [`ChatDispatcher`]. The [`ChatRewriter`] listener
//! sits at [`ListenerPriority::Lowest`], so it sees every message first:
//! senders with a prefix get their message cancelled and replaced by a
//! tagged one; everyone else passes through untouched.
//!
//! ```text
//! host chat ──→ ChatEvent ──→ ChatDispatcher ──→ [ChatRewriter, other listeners…]
//!                                   │
//!                                   └──→ default delivery (if not cancelled)
//! ```

mod dispatcher;
mod event;
mod rewriter;

pub use dispatcher::{ChatDispatcher, ChatListener, Delivery, ListenerPriority};
pub use event::{Audience, ChatEvent};
pub use rewriter::ChatRewriter;
