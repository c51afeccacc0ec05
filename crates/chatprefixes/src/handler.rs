//! Host events: what the host sends in, and how each is handled.
//!
//! Chat is handled inline on the loop task (a registry lookup and some
//! string building; nothing that blocks). Commands and reloads touch the
//! store synchronously, so each runs on Tokio's blocking pool and
//! answers through a oneshot reply channel.

use std::sync::Arc;

use chatprefixes_chat::ChatEvent;
use chatprefixes_command::{CommandOutcome, Invoker, PlayerDirectory};
use chatprefixes_registry::{RegistryError, ReloadReport};
use tokio::sync::{mpsc, oneshot};

use crate::{ChatPrefixes, ChatPrefixesError};

/// An event from the host.
#[derive(Debug)]
pub enum HostEvent {
    /// An outgoing chat message, not yet delivered.
    Chat(ChatEvent),

    /// `label args…` run by `invoker`.
    Command {
        invoker: Invoker,
        label: String,
        args: Vec<String>,
        reply: oneshot::Sender<CommandOutcome>,
    },

    /// Re-read the store (e.g. after an administrator edited the file).
    Reload {
        reply: oneshot::Sender<Result<ReloadReport, RegistryError>>,
    },

    /// Stop the loop.
    Shutdown,
}

pub(crate) fn handle_event<D: PlayerDirectory>(prefixes: &ChatPrefixes<D>, event: HostEvent) {
    match event {
        HostEvent::Chat(chat) => {
            prefixes.dispatcher.dispatch(chat);
        }

        HostEvent::Command {
            invoker,
            label,
            args,
            reply,
        } => {
            let authority = Arc::clone(&prefixes.authority);
            tokio::spawn(async move {
                let task_label = label.clone();
                let result = tokio::task::spawn_blocking(move || {
                    authority.dispatch(&label, &invoker, &args[..])
                })
                .await;

                match result {
                    Ok(outcome) => {
                        if let Err(e) = &outcome {
                            tracing::debug!(label = %task_label, error = %e, "command refused");
                        }
                        let _ = reply.send(outcome);
                    }
                    Err(e) => {
                        tracing::error!(label = %task_label, error = %e, "command task failed");
                    }
                }
            });
        }

        HostEvent::Reload { reply } => {
            let registry = Arc::clone(&prefixes.registry);
            tokio::spawn(async move {
                match tokio::task::spawn_blocking(move || registry.reload()).await {
                    Ok(result) => {
                        if let Err(e) = &result {
                            tracing::warn!(error = %e, "prefix reload failed; keeping previous prefixes");
                        }
                        let _ = reply.send(result);
                    }
                    Err(e) => tracing::error!(error = %e, "reload task failed"),
                }
            });
        }

        // `run` stops before handing this over.
        HostEvent::Shutdown => {}
    }
}

/// A cheap, clonable handle for sending events to a running service.
#[derive(Debug, Clone)]
pub struct HostHandle {
    sender: mpsc::Sender<HostEvent>,
}

impl HostHandle {
    pub(crate) fn new(sender: mpsc::Sender<HostEvent>) -> Self {
        Self { sender }
    }

    /// Hands a chat message to the pipeline (fire-and-forget).
    pub async fn chat(&self, event: ChatEvent) -> Result<(), ChatPrefixesError> {
        self.send(HostEvent::Chat(event)).await
    }

    /// Runs a command and waits for its outcome.
    pub async fn command(
        &self,
        invoker: Invoker,
        label: &str,
        args: &[&str],
    ) -> Result<CommandOutcome, ChatPrefixesError> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(HostEvent::Command {
            invoker,
            label: label.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            reply,
        })
        .await?;
        reply_rx.await.map_err(|_| ChatPrefixesError::Unavailable)
    }

    /// Reloads the registry from the store and waits for the result.
    pub async fn reload(&self) -> Result<ReloadReport, ChatPrefixesError> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(HostEvent::Reload { reply }).await?;
        Ok(reply_rx.await.map_err(|_| ChatPrefixesError::Unavailable)??)
    }

    /// Asks the loop to stop. It saves the store on the way out.
    pub async fn shutdown(&self) -> Result<(), ChatPrefixesError> {
        self.send(HostEvent::Shutdown).await
    }

    async fn send(&self, event: HostEvent) -> Result<(), ChatPrefixesError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| ChatPrefixesError::Unavailable)
    }
}
