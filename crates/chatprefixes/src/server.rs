//! `ChatPrefixes` builder and event loop.
//!
//! This is the composition root: it opens the store, builds the one
//! shared [`PrefixRegistry`], and hands it to the command and chat
//! layers. Nothing is global; two services over two stores can run side
//! by side in one process.

use std::sync::Arc;

use chatprefixes_chat::{ChatDispatcher, ChatListener, ChatRewriter};
use chatprefixes_command::{CommandAuthority, PlayerDirectory};
use chatprefixes_protocol::BorderPair;
use chatprefixes_registry::{PrefixRegistry, PrefixStore, YamlFileStore};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::handler::{HostEvent, HostHandle, handle_event};
use crate::{ChatPrefixesConfig, ChatPrefixesError};

/// Builder for configuring and loading ChatPrefixes.
///
/// # Example
///
/// ```rust,ignore
/// let prefixes = ChatPrefixesBuilder::new()
///     .store(MemoryStore::default())
///     .build(my_directory)?;
/// ```
pub struct ChatPrefixesBuilder {
    config: ChatPrefixesConfig,
    store: Option<Box<dyn PrefixStore>>,
    listeners: Vec<Arc<dyn ChatListener>>,
}

impl ChatPrefixesBuilder {
    pub fn new() -> Self {
        Self {
            config: ChatPrefixesConfig::default(),
            store: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(mut self, config: ChatPrefixesConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `store` instead of the YAML file at `config.store_path`.
    pub fn store(mut self, store: impl PrefixStore) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Registers an extra chat listener. It runs after the prefix
    /// rewriter unless it also asks for `Lowest` priority.
    pub fn listener(mut self, listener: Arc<dyn ChatListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Opens the store, loads every stored prefix, and wires up the
    /// command and chat layers.
    ///
    /// A border setting shorter than two characters is logged and
    /// replaced by `[]`; it never fails the build.
    pub fn build<D: PlayerDirectory>(
        self,
        directory: D,
    ) -> Result<ChatPrefixes<D>, ChatPrefixesError> {
        self.config.validate()?;

        let store: Box<dyn PrefixStore> = match self.store {
            Some(store) => store,
            None => Box::new(YamlFileStore::open(&self.config.store_path)?),
        };

        let registry = Arc::new(PrefixRegistry::new(store));
        registry.reload()?;

        let border = BorderPair::parse(&registry.border());

        let authority = Arc::new(CommandAuthority::new(
            Arc::clone(&registry),
            directory,
            border,
        ));

        let mut dispatcher = ChatDispatcher::new();
        dispatcher.register(Arc::new(ChatRewriter::new(Arc::clone(&registry), border)));
        for listener in self.listeners {
            dispatcher.register(listener);
        }

        tracing::info!(prefixes = registry.len(), %border, "ChatPrefixes loaded");

        Ok(ChatPrefixes {
            registry,
            authority,
            dispatcher,
            config: self.config,
        })
    }
}

impl Default for ChatPrefixesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded ChatPrefixes service.
///
/// Either drive it yourself (call [`dispatcher`](Self::dispatcher) from
/// the host's chat hook and [`authority`](Self::authority) from its
/// command hook), or [`start`](Self::start) the event loop and talk to it
/// through a [`HostHandle`].
pub struct ChatPrefixes<D: PlayerDirectory> {
    pub(crate) registry: Arc<PrefixRegistry>,
    pub(crate) authority: Arc<CommandAuthority<D>>,
    pub(crate) dispatcher: ChatDispatcher,
    config: ChatPrefixesConfig,
}

impl<D: PlayerDirectory> ChatPrefixes<D> {
    pub fn registry(&self) -> &Arc<PrefixRegistry> {
        &self.registry
    }

    pub fn authority(&self) -> &Arc<CommandAuthority<D>> {
        &self.authority
    }

    pub fn dispatcher(&self) -> &ChatDispatcher {
        &self.dispatcher
    }

    /// Spawns the event loop on the current Tokio runtime.
    pub fn start(self) -> (HostHandle, JoinHandle<Result<(), ChatPrefixesError>>) {
        let (sender, receiver) = mpsc::channel(self.config.event_buffer);
        let task = tokio::spawn(self.run(receiver));
        (HostHandle::new(sender), task)
    }

    /// Processes host events until [`HostEvent::Shutdown`] arrives or
    /// every sender is dropped, then saves the store one last time.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<HostEvent>,
    ) -> Result<(), ChatPrefixesError> {
        tracing::info!("ChatPrefixes running");

        while let Some(event) = events.recv().await {
            if matches!(event, HostEvent::Shutdown) {
                break;
            }
            handle_event(&self, event);
        }

        self.shutdown().await
    }

    async fn shutdown(self) -> Result<(), ChatPrefixesError> {
        if self.config.save_on_shutdown {
            let registry = Arc::clone(&self.registry);
            tokio::task::spawn_blocking(move || registry.flush())
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "final prefix save panicked");
                    ChatPrefixesError::Unavailable
                })??;
        }

        tracing::info!("ChatPrefixes unloaded");
        Ok(())
    }
}
