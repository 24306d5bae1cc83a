//! Key-value store implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error_handling::StorageError;

/// In-process store; lives as long as the "session" that owns it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage disabled by the browsing context (private mode, blocked cookies).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Store backed by a flat JSON object on disk.
///
/// The whole file is rewritten on every change. A missing file is an empty
/// session.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, reading existing entries if the file exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read, or
    /// `StorageError::Serialization` if it is not a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!(
            "Opened session store {} with {} entries",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // Removing twice is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_unavailable_store_fails_every_call() {
        let mut store = UnavailableStore;
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("session.json")).unwrap();
        assert_eq!(store.get("mlp_utm_source").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("mlp_utm_source", "WeChat").unwrap();
            store.set("mlp_utm_medium", "social").unwrap();
            store.remove("mlp_utm_medium").unwrap();
        }
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("mlp_utm_source").unwrap().as_deref(),
            Some("WeChat")
        );
        assert_eq!(reopened.get("mlp_utm_medium").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_json_file_store_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist
        let mut store = JsonFileStore::open(dir.path().join("missing").join("s.json")).unwrap();
        assert!(matches!(store.set("k", "v"), Err(StorageError::Io(_))));
    }
}
