//! Local key-value storage.
//!
//! Holds the session token returned by a successful login. The storage is a
//! flat string map; [`FileStore`] persists it as a JSON object, [`MemoryStore`]
//! keeps it for the lifetime of the process.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Key under which the login token is stored.
pub const TOKEN_KEY: &str = "token";

/// Errors that can occur when reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings.
    #[error("Storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-to-string store.
pub trait KeyValueStore {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;
}

/// Persist the session token.
///
/// # Errors
///
/// Returns `StorageError` if the store cannot be written.
pub fn store_token<S: KeyValueStore + ?Sized>(
    store: &mut S,
    token: &SecretString,
) -> Result<(), StorageError> {
    store.set(TOKEN_KEY, token.expose_secret())
}

/// Read the session token, if one is stored.
///
/// # Errors
///
/// Returns `StorageError` if the store cannot be read.
pub fn load_token<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<SecretString>, StorageError> {
    Ok(store.get(TOKEN_KEY)?.map(SecretString::from))
}

// =============================================================================
// In-memory store
// =============================================================================

/// Process-lifetime storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Storage persisted to a JSON file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written file behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Ok(Self { path, entries })
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk. The in-memory map is only replaced by the
    /// caller once this succeeds.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        let written = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(source) = written {
            if let Err(e) = std::fs::remove_file(&tmp) {
                tracing::debug!(path = %tmp.display(), error = %e, "No temporary file to clean up");
            }
            return Err(io_err(source));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.flush(&entries)?;
        self.entries = entries;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }

    #[test]
    fn test_token_helpers() {
        let mut store = MemoryStore::new();
        assert!(load_token(&store).unwrap().is_none());

        store_token(&mut store, &SecretString::from("abc")).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(load_token(&store).unwrap().unwrap().expose_secret(), "abc");
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set("theme", "dark").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(TOKEN_KEY, "abc").unwrap();
        assert!(store.remove(TOKEN_KEY).unwrap());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("theme", "dark").unwrap();

        // A directory in the temp file's place makes every write fail
        let tmp = path.with_extension("json.tmp");
        std::fs::create_dir(&tmp).unwrap();

        assert!(matches!(
            store.set(TOKEN_KEY, "abc"),
            Err(StorageError::Io { .. })
        ));
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert!(load_token(&store).unwrap().is_none());

        assert!(store.remove("theme").is_err());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // The target is a non-empty directory, so the rename over it fails
        let path = dir.path().join("storage.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let mut store = FileStore {
            path: path.clone(),
            entries: BTreeMap::new(),
        };
        assert!(store.set(TOKEN_KEY, "abc").is_err());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
