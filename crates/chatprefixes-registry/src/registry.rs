//! The prefix registry: `PlayerId → PrefixInfo`, written through to a store.
//!
//! # Concurrency
//!
//! Lookups happen on every chat message; writes happen when an
//! administrator runs a command. The map therefore sits behind an
//! `RwLock` so any number of lookups run in parallel, and readers only
//! ever see whole entries.
//!
//! Writers additionally hold the `store` mutex for the whole operation
//! (check → persist → publish). That makes add/remove/reload mutually
//! exclusive, keeps the cached document in step with the map, and means
//! the map's write lock is only held for the final swap, never across
//! file I/O.

use std::collections::HashMap;
use std::sync::{
    Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use chatprefixes_protocol::{
    DEFAULT_BORDER, HexColor, PlayerId, PrefixDocument, PrefixInfo, StoredPrefix,
};

use crate::{PrefixStore, RegistryError};

/// What a [`PrefixRegistry::reload`] found in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadReport {
    /// Entries now in the registry.
    pub loaded: usize,
    /// Entries whose key isn't a player UUID; left in the store, not loaded.
    pub skipped: usize,
    /// Loaded entries with a missing field or a colour that isn't `#RRGGBB`.
    pub malformed: usize,
}

struct StoreState {
    backend: Box<dyn PrefixStore>,
    /// The last document read from or written to `backend`. Kept so a
    /// save preserves everything the registry doesn't model (the border,
    /// entries with unusable keys).
    document: PrefixDocument,
    /// Whether `document` came from `backend`. Until it has, writes load
    /// first so they never save over what is already stored.
    loaded: bool,
}

/// Concurrency-safe registry of player prefixes.
///
/// Construct one at startup, call [`reload`](Self::reload) to fill it,
/// and share it behind an `Arc` with the command and chat layers.
pub struct PrefixRegistry {
    entries: RwLock<HashMap<PlayerId, PrefixInfo>>,
    store: Mutex<StoreState>,
}

impl PrefixRegistry {
    /// Creates an empty registry over `store`.
    ///
    /// Nothing is read until [`reload`](Self::reload) is called or the
    /// first write (add, remove, flush), which loads the store before
    /// changing it.
    pub fn new(store: impl PrefixStore) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            store: Mutex::new(StoreState {
                backend: Box::new(store),
                document: PrefixDocument::default(),
                loaded: false,
            }),
        }
    }

    /// Returns the prefix for `player_id`, if any.
    ///
    /// Never blocks on I/O: the store is only touched by writers, and
    /// they hold the read side off for a pointer-sized swap at most.
    pub fn lookup(&self, player_id: &PlayerId) -> Option<PrefixInfo> {
        self.read_entries().get(player_id).cloned()
    }

    /// Assigns a prefix to a player who doesn't have one.
    ///
    /// The store is written before the entry becomes visible; if the
    /// write fails the registry is left exactly as it was.
    ///
    /// # Errors
    /// - [`RegistryError::InvalidColor`]: `colour` isn't `#RRGGBB`
    /// - [`RegistryError::AlreadyExists`]: the player already has a prefix
    /// - [`RegistryError::Store`]: persisting failed
    pub fn add(
        &self,
        player_id: PlayerId,
        tag_name: &str,
        colour: &str,
    ) -> Result<PrefixInfo, RegistryError> {
        HexColor::parse(colour).map_err(RegistryError::InvalidColor)?;

        let mut store = self.lock_store();
        self.ensure_loaded(&mut store)?;
        if self.read_entries().contains_key(&player_id) {
            return Err(RegistryError::AlreadyExists(player_id));
        }

        let mut next = store.document.clone();
        next.prefixes
            .insert(player_id.to_key(), StoredPrefix::new(tag_name, colour));
        store.backend.save(&next)?;
        store.document = next;

        let info = PrefixInfo::new(tag_name, colour);
        self.write_entries().insert(player_id, info.clone());

        tracing::info!(%player_id, tag = tag_name, colour, "prefix added");
        Ok(info)
    }

    /// Removes a player's prefix, returning what was removed.
    ///
    /// # Errors
    /// - [`RegistryError::NotFound`]: the player has no prefix
    /// - [`RegistryError::Store`]: persisting failed
    pub fn remove(&self, player_id: PlayerId) -> Result<PrefixInfo, RegistryError> {
        let mut store = self.lock_store();
        self.ensure_loaded(&mut store)?;
        if !self.read_entries().contains_key(&player_id) {
            return Err(RegistryError::NotFound(player_id));
        }

        // Hand-edited stores may spell the same UUID in upper case, so
        // match keys by parsed id rather than by string.
        let mut next = store.document.clone();
        next.prefixes
            .retain(|key, _| key.parse::<PlayerId>().map_or(true, |id| id != player_id));
        store.backend.save(&next)?;
        store.document = next;

        let removed = self
            .write_entries()
            .remove(&player_id)
            .ok_or(RegistryError::NotFound(player_id))?;

        tracing::info!(%player_id, tag = %removed.tag_name, "prefix removed");
        Ok(removed)
    }

    /// Replaces the whole in-memory map with what the store holds now.
    ///
    /// Stored colours are not re-validated. Malformed entries are loaded
    /// as-is (missing fields become empty strings) and logged; entries
    /// whose key isn't a UUID can't be attributed to a player and are
    /// skipped, but stay in the store.
    ///
    /// # Errors
    /// Returns [`RegistryError::Store`] if the store can't be read, in
    /// which case the previous contents are kept.
    pub fn reload(&self) -> Result<ReloadReport, RegistryError> {
        let mut store = self.lock_store();
        self.reload_locked(&mut store)
    }

    fn reload_locked(&self, store: &mut StoreState) -> Result<ReloadReport, RegistryError> {
        let mut document = store.backend.load()?;

        if document.prefix_border.is_none() {
            document.prefix_border = Some(DEFAULT_BORDER.to_string());
        }

        let mut report = ReloadReport::default();
        let mut entries = HashMap::with_capacity(document.prefixes.len());

        for (key, stored) in &document.prefixes {
            let player_id = match key.parse::<PlayerId>() {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(%key, error = %e, "skipping stored prefix with invalid player id");
                    report.skipped += 1;
                    continue;
                }
            };

            let info = pass_through(&player_id, stored, &mut report);
            if entries.insert(player_id, info).is_some() {
                tracing::warn!(%player_id, %key, "duplicate stored prefix; keeping the last one");
            }
        }

        report.loaded = entries.len();
        *self.write_entries() = entries;
        store.document = document;
        store.loaded = true;

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped,
            malformed = report.malformed,
            "prefix registry reloaded"
        );
        Ok(report)
    }

    /// Writes the cached document back to the store. A registry that
    /// never loaded has nothing of its own to write, so this is a no-op.
    pub fn flush(&self) -> Result<(), RegistryError> {
        let store = self.lock_store();
        if !store.loaded {
            return Ok(());
        }
        store.backend.save(&store.document)?;
        Ok(())
    }

    /// The raw `prefix-border` setting from the last load.
    pub fn border(&self) -> String {
        self.lock_store()
            .document
            .prefix_border
            .clone()
            .unwrap_or_else(|| DEFAULT_BORDER.to_string())
    }

    /// A snapshot of every entry.
    pub fn entries(&self) -> Vec<(PlayerId, PrefixInfo)> {
        self.read_entries()
            .iter()
            .map(|(id, info)| (*id, info.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    // A panic while holding a lock can't leave a half-written entry
    // (entries are inserted whole), so poisoning is ignored.

    fn ensure_loaded(&self, store: &mut StoreState) -> Result<(), RegistryError> {
        if !store.loaded {
            tracing::debug!("registry written before reload; loading store first");
            self.reload_locked(store)?;
        }
        Ok(())
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<PlayerId, PrefixInfo>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<PlayerId, PrefixInfo>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_store(&self) -> MutexGuard<'_, StoreState> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds a `PrefixInfo` from a stored entry without correcting it.
fn pass_through(
    player_id: &PlayerId,
    stored: &StoredPrefix,
    report: &mut ReloadReport,
) -> PrefixInfo {
    let mut malformed = false;

    let tag_name = stored.tag_name.clone().unwrap_or_else(|| {
        tracing::warn!(%player_id, "stored prefix has no tag-name");
        malformed = true;
        String::new()
    });

    let colour = stored.colour.clone().unwrap_or_else(|| {
        tracing::warn!(%player_id, "stored prefix has no colour");
        malformed = true;
        String::new()
    });

    if !colour.is_empty() && HexColor::parse(&colour).is_err() {
        tracing::warn!(%player_id, %colour, "stored prefix colour is not #RRGGBB; loading as-is");
        malformed = true;
    }

    if malformed {
        report.malformed += 1;
    }

    PrefixInfo { tag_name, colour }
}
