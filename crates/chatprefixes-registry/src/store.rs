//! The persistence seam behind the registry.

use std::sync::{Arc, Mutex, PoisonError};

use chatprefixes_protocol::PrefixDocument;

use crate::StoreError;

/// Somewhere the prefix document lives between restarts.
///
/// Both methods are synchronous: the registry calls `save` inside every
/// add/remove and only reports success once it returns. Implementations
/// must write the whole document atomically from a reader's point of
/// view.
pub trait PrefixStore: Send + Sync + 'static {
    /// Reads the current document.
    fn load(&self) -> Result<PrefixDocument, StoreError>;

    /// Replaces the stored document.
    fn save(&self, document: &PrefixDocument) -> Result<(), StoreError>;
}

/// An in-process store.
///
/// Clones share the same document, so a test (or an embedding host) can
/// keep one handle and edit the "file" behind the registry's back with
/// [`replace`](Self::replace).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Arc<Mutex<PrefixDocument>>,
}

impl MemoryStore {
    pub fn new(document: PrefixDocument) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
        }
    }

    /// Returns a copy of the stored document.
    pub fn document(&self) -> PrefixDocument {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrites the stored document without going through a registry.
    pub fn replace(&self, document: PrefixDocument) {
        *self.document.lock().unwrap_or_else(PoisonError::into_inner) = document;
    }
}

impl PrefixStore for MemoryStore {
    fn load(&self) -> Result<PrefixDocument, StoreError> {
        Ok(self.document())
    }

    fn save(&self, document: &PrefixDocument) -> Result<(), StoreError> {
        self.replace(document.clone());
        Ok(())
    }
}

impl<S: PrefixStore + ?Sized> PrefixStore for Box<S> {
    fn load(&self) -> Result<PrefixDocument, StoreError> {
        (**self).load()
    }

    fn save(&self, document: &PrefixDocument) -> Result<(), StoreError> {
        (**self).save(document)
    }
}
