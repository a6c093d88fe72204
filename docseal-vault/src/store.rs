//! Injected key-value storage backing the vault.
//!
//! The vault never talks to a concrete storage backend directly; hosts
//! inject one store per tier. `MemoryStore` and `FileStore` cover the
//! session-scoped and on-disk cases.

use crate::error::{VaultError, VaultResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// The two logical storage tiers a record can live in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageTier {
    #[default]
    Persistent,
    Session,
}

/// Minimal key-value contract the vault persists through.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> VaultResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> VaultResult<()>;
    fn delete(&self, key: &str) -> VaultResult<()>;
}

/// In-memory store for session-scoped records and tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> VaultResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> VaultResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> VaultResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

/// Sanitize a storage key for use as a file name.
/// Replaces any character that isn't alphanumeric or underscore with '_'.
fn sanitize_for_filename(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

impl FileStore {
    /// Opens (creating if needed) a file store rooted at the given directory.
    pub fn open(root: impl Into<PathBuf>) -> VaultResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| VaultError::Storage(e.to_string()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_for_filename(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> VaultResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::Storage(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> VaultResult<()> {
        std::fs::write(self.path_for(key), value).map_err(|e| VaultError::Storage(e.to_string()))
    }

    fn delete(&self, key: &str) -> VaultResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("docseal.keys", "{\"a\":1}").unwrap();
        assert_eq!(store.get("docseal.keys").unwrap().as_deref(), Some("{\"a\":1}"));

        store.delete("docseal.keys").unwrap();
        assert_eq!(store.get("docseal.keys").unwrap(), None);
    }

    #[test]
    fn file_store_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.delete("never-written").is_ok());
    }

    #[test]
    fn keys_with_separators_become_safe_filenames() {
        assert_eq!(sanitize_for_filename("docseal.keys.lock"), "docseal_keys_lock");
        assert_eq!(sanitize_for_filename("../escape"), "___escape");
    }
}
