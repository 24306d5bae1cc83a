//! Session store setup.

use std::path::Path;

use log::info;

use crate::error_handling::{InitializationError, StorageError};
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Backend chosen for the run's session record.
#[derive(Debug)]
pub enum SessionStore {
    /// Lives for one invocation
    Memory(MemoryStore),
    /// Shared by invocations using the same file
    File(JsonFileStore),
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            SessionStore::Memory(store) => store.get(key),
            SessionStore::File(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            SessionStore::Memory(store) => store.set(key, value),
            SessionStore::File(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            SessionStore::Memory(store) => store.remove(key),
            SessionStore::File(store) => store.remove(key),
        }
    }
}

/// Opens the session file, or an in-memory session when none is given.
///
/// # Errors
///
/// Returns `InitializationError::SessionStoreError` if the file exists but
/// cannot be read or is not a JSON object of strings.
pub fn init_session_store(path: Option<&Path>) -> Result<SessionStore, InitializationError> {
    match path {
        Some(path) => {
            let store = JsonFileStore::open(path)?;
            info!("Using session file {}", path.display());
            Ok(SessionStore::File(store))
        }
        None => Ok(SessionStore::Memory(MemoryStore::new())),
    }
}
