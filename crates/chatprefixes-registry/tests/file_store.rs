//! Integration tests for the YAML file store and the registry on top of it.

use std::fs;
use std::path::PathBuf;

use chatprefixes_protocol::{PlayerId, PrefixDocument, PrefixInfo, StoredPrefix};
use chatprefixes_registry::{
    PrefixRegistry, PrefixStore, RegistryError, ReloadReport, StoreError, YamlFileStore,
};
use uuid::Uuid;

// =========================================================================
// Helpers
// =========================================================================

/// A unique path under the system temp dir; removed on drop.
struct TempPath(PathBuf);

impl TempPath {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("chatprefixes-{}", Uuid::new_v4()));
        Self(dir.join("prefixes.yml"))
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        if let Some(dir) = self.0.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}

fn pid(n: u128) -> PlayerId {
    PlayerId(Uuid::from_u128(n))
}

/// A store whose writes always fail.
struct ReadOnlyStore(PrefixDocument);

impl PrefixStore for ReadOnlyStore {
    fn load(&self) -> Result<PrefixDocument, StoreError> {
        Ok(self.0.clone())
    }

    fn save(&self, _document: &PrefixDocument) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: PathBuf::from("read-only"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_open_creates_default_document() {
    let path = TempPath::new();
    let store = YamlFileStore::open(&path.0).expect("open");

    assert!(path.0.exists());
    let doc = store.load().unwrap();
    assert_eq!(doc, PrefixDocument::with_defaults());
}

#[test]
fn test_open_keeps_existing_file() {
    let path = TempPath::new();
    fs::create_dir_all(path.0.parent().unwrap()).unwrap();
    fs::write(&path.0, "prefix-border: '<>'\n").unwrap();

    let store = YamlFileStore::open(&path.0).unwrap();
    assert_eq!(store.load().unwrap().prefix_border.as_deref(), Some("<>"));
}

#[test]
fn test_empty_file_loads_as_empty_document() {
    let path = TempPath::new();
    let store = YamlFileStore::open(&path.0).unwrap();
    fs::write(&path.0, "\n").unwrap();

    assert_eq!(store.load().unwrap(), PrefixDocument::default());
}

#[test]
fn test_registry_writes_through_to_file() {
    let path = TempPath::new();
    let registry = PrefixRegistry::new(YamlFileStore::open(&path.0).unwrap());
    registry.reload().unwrap();

    registry.add(pid(1), "VIP", "#ff0000").unwrap();

    // A second registry over the same file sees the entry.
    let other = PrefixRegistry::new(YamlFileStore::open(&path.0).unwrap());
    other.reload().unwrap();
    assert_eq!(other.lookup(&pid(1)), Some(PrefixInfo::new("VIP", "#ff0000")));

    registry.remove(pid(1)).unwrap();
    other.reload().unwrap();
    assert_eq!(other.lookup(&pid(1)), None);
}

#[test]
fn test_reload_after_hand_edit() {
    let path = TempPath::new();
    let registry = PrefixRegistry::new(YamlFileStore::open(&path.0).unwrap());
    registry.reload().unwrap();
    registry.add(pid(1), "VIP", "#ff0000").unwrap();

    let yaml = format!(
        "prefix-border: '{{}}'\nprefixes:\n  {}:\n    tag-name: MOD\n    colour: not-a-colour\n  nobody:\n    tag-name: X\n",
        pid(2).to_key()
    );
    fs::write(&path.0, yaml).unwrap();

    let report = registry.reload().unwrap();
    assert_eq!(report, ReloadReport { loaded: 1, skipped: 1, malformed: 1 });
    assert_eq!(registry.lookup(&pid(1)), None);
    assert_eq!(registry.lookup(&pid(2)), Some(PrefixInfo::new("MOD", "not-a-colour")));
    assert_eq!(registry.border(), "{}");
}

#[test]
fn test_reload_of_garbage_keeps_previous_contents() {
    let path = TempPath::new();
    let registry = PrefixRegistry::new(YamlFileStore::open(&path.0).unwrap());
    registry.reload().unwrap();
    registry.add(pid(1), "VIP", "#ff0000").unwrap();

    fs::write(&path.0, "- not\n- a document\n").unwrap();

    assert!(matches!(registry.reload(), Err(RegistryError::Store(StoreError::Codec(_)))));
    assert_eq!(registry.lookup(&pid(1)), Some(PrefixInfo::new("VIP", "#ff0000")));
}

#[test]
fn test_failed_save_leaves_registry_unchanged() {
    let mut doc = PrefixDocument::with_defaults();
    doc.prefixes.insert(pid(2).to_key(), StoredPrefix::new("MOD", "#00ff00"));
    let registry = PrefixRegistry::new(ReadOnlyStore(doc));
    registry.reload().unwrap();

    assert!(matches!(
        registry.add(pid(1), "VIP", "#ff0000"),
        Err(RegistryError::Store(_))
    ));
    assert_eq!(registry.lookup(&pid(1)), None);

    assert!(matches!(registry.remove(pid(2)), Err(RegistryError::Store(_))));
    assert!(registry.lookup(&pid(2)).is_some());
}
