//! File-backed store.

use std::fs;
use std::path::{Path, PathBuf};

use chatprefixes_protocol::{Codec, PrefixDocument, YamlCodec};

use crate::{PrefixStore, StoreError};

/// A [`PrefixStore`] kept in a single file, encoded with `C`.
#[derive(Debug)]
pub struct FileStore<C: Codec = YamlCodec> {
    path: PathBuf,
    codec: C,
}

/// The usual store: a YAML file.
pub type YamlFileStore = FileStore<YamlCodec>;

impl FileStore<YamlCodec> {
    /// Opens (or creates) a YAML store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::with_codec(path, YamlCodec)
    }
}

impl<C: Codec> FileStore<C> {
    /// Opens a store at `path` using `codec`.
    ///
    /// If the file doesn't exist yet, a default document (default
    /// border, no prefixes) is written so administrators have something
    /// to edit.
    pub fn with_codec(path: impl Into<PathBuf>, codec: C) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            codec,
        };

        if !store.path.exists() {
            tracing::info!(path = %store.path.display(), "creating default prefix store");
            store.save(&PrefixDocument::with_defaults())?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<C: Codec> PrefixStore for FileStore<C> {
    fn load(&self) -> Result<PrefixDocument, StoreError> {
        let data = fs::read(&self.path).map_err(|e| self.io_error(e))?;

        // An emptied-out file is treated like a fresh one.
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(PrefixDocument::default());
        }

        Ok(self.codec.decode(&data)?)
    }

    fn save(&self, document: &PrefixDocument) -> Result<(), StoreError> {
        let bytes = self.codec.encode(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        // Write-then-rename so a reader never sees half a document.
        let temp = self.temp_path();
        fs::write(&temp, bytes).map_err(|e| self.io_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            prefixes = document.prefixes.len(),
            "prefix store saved"
        );
        Ok(())
    }
}
