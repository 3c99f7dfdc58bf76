//! # Durable Storage
//!
//! A small synchronous key-value abstraction standing in for client-side storage.
//!
//! Access is treated as a fast local call, so the trait is deliberately **not** async:
//! a slot mutation writes through to storage before it returns.
//!
//! ## Backends
//!
//! - [`FileStorage`]: one file per key under a directory, written atomically.
//! - [`MemoryStorage`]: an in-process map with an optional byte quota.
//! - [`MockStorage`](crate::framework::mock::MockStorage): scripted failures for tests.

use crate::framework::error::StorageError;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

/// Synchronous key-value storage that survives process restarts.
///
/// Removing a key that does not exist is not an error.
pub trait DurableStorage: Send + Sync {
    /// Reads the raw value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key` entirely.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

/// In-process storage. Survives store re-creation but not process exit.
///
/// Sharing one `Arc<MemoryStorage>` between two stores is how tests simulate
/// a restart: drop the first store, load a second from the same backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that refuses writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Writes `value` directly, bypassing the quota. Used to seed fixtures.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries()?;
        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(used);
            if needed > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE BACKEND
// =============================================================================

/// File-backed storage: key `k` lives in `<dir>/k.json`.
///
/// Writes go to a uniquely named temp file in the same directory which is then
/// renamed over the target, so a reader sees either the old value or the complete
/// new one, and concurrent writers never share a temp file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        // Unique per write; dropped (and deleted) on any error before persist.
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io(key, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(key, e))?;
        tmp.persist(&path).map_err(|e| StorageError::io(key, e.error))?;
        debug!(key, path = %path.display(), bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(16);
        storage.set("cart", "0123456789").unwrap();

        let err = storage.set("other", "0123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));

        // Replacing the existing key does not count its old value.
        storage.set("cart", "abcdefghij").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("abcdefghij"));
    }

    #[test]
    fn file_storage_missing_key_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("cart").unwrap(), None);
        storage.remove("cart").unwrap();
    }

    #[test]
    fn file_storage_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("cart", r#"{"a":1}"#).unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert!(dir.path().join("cart.json").exists());

        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
        assert!(!dir.path().join("cart.json").exists());
    }

    fn dir_entries(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn file_storage_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        for value in ["1", "22", "333"] {
            storage.set("cart", value).unwrap();
        }

        assert_eq!(dir_entries(&dir), ["cart.json"]);
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("333"));
    }

    #[test]
    fn failed_rename_cleans_up_temp_file() {
        let dir = TempDir::new().unwrap();
        // A directory in the target's place makes the final rename fail.
        fs::create_dir(dir.path().join("cart.json")).unwrap();
        let storage = FileStorage::new(dir.path());

        let err = storage.set("cart", "{}").unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(dir_entries(&dir), ["cart.json"]);
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        let err = storage.set("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
