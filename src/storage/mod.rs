//! Best-effort key-value storage.
//!
//! The browser offers session-scoped and local storage that may be disabled
//! at any time. Both are modelled by [`KeyValueStore`], whose operations
//! return an explicit `Result`; callers at the pipeline boundary decide to
//! treat a failure as "nothing stored".

mod backends;

pub use backends::{JsonFileStore, MemoryStore, UnavailableStore};

use crate::attribution::AttributionRecord;
use crate::config::{
    SESSION_KEY_CAMPAIGN, SESSION_KEY_CONTENT, SESSION_KEY_MEDIUM, SESSION_KEY_SOURCE,
    SESSION_KEY_TERM,
};
use crate::error_handling::StorageError;

/// A string key-value store that may be unavailable.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Session persistence for the campaign record.
///
/// Each field lives under its own `mlp_utm_*` key.
#[derive(Debug)]
pub struct AttributionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> AttributionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Stores the record, replacing whatever was saved before.
    ///
    /// Non-empty fields are written; keys of empty fields are removed so a
    /// stale campaign from an earlier landing cannot leak into this one.
    /// Returns the number of fields written.
    pub fn save(&mut self, record: &AttributionRecord) -> Result<usize, StorageError> {
        let mut written = 0;
        for (key, value) in keyed_fields(record) {
            if value.is_empty() {
                self.backend.remove(key)?;
            } else {
                self.backend.set(key, value)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Reads the record back; absent keys become empty fields.
    pub fn load(&self) -> Result<AttributionRecord, StorageError> {
        let read = |key: &str| -> Result<String, StorageError> {
            Ok(self.backend.get(key)?.unwrap_or_default())
        };
        Ok(AttributionRecord {
            source: read(SESSION_KEY_SOURCE)?,
            medium: read(SESSION_KEY_MEDIUM)?,
            campaign: read(SESSION_KEY_CAMPAIGN)?,
            content: read(SESSION_KEY_CONTENT)?,
            term: read(SESSION_KEY_TERM)?,
        })
    }
}

fn keyed_fields(record: &AttributionRecord) -> [(&'static str, &str); 5] {
    [
        (SESSION_KEY_SOURCE, record.source.as_str()),
        (SESSION_KEY_MEDIUM, record.medium.as_str()),
        (SESSION_KEY_CAMPAIGN, record.campaign.as_str()),
        (SESSION_KEY_CONTENT, record.content.as_str()),
        (SESSION_KEY_TERM, record.term.as_str()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wechat_social() -> AttributionRecord {
        AttributionRecord {
            source: "WeChat".into(),
            medium: "social".into(),
            campaign: "MLP".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut store = AttributionStore::new(MemoryStore::new());
        let written = store.save(&wechat_social()).expect("memory store is available");
        assert_eq!(written, 3);
        assert_eq!(store.load().expect("load"), wechat_social());
    }

    #[test]
    fn test_save_uses_session_keys() {
        let mut store = AttributionStore::new(MemoryStore::new());
        store.save(&wechat_social()).expect("save");
        let backend = store.backend();
        assert_eq!(
            backend.get("mlp_utm_source").unwrap().as_deref(),
            Some("WeChat")
        );
        assert_eq!(
            backend.get("mlp_utm_medium").unwrap().as_deref(),
            Some("social")
        );
        assert_eq!(backend.get("mlp_utm_content").unwrap(), None);
    }

    #[test]
    fn test_save_replaces_previous_record() {
        let mut store = AttributionStore::new(MemoryStore::new());
        store.save(&wechat_social()).expect("save");
        let second = AttributionRecord {
            source: "LINE".into(),
            medium: "line".into(),
            ..Default::default()
        };
        store.save(&second).expect("save");
        // The earlier campaign is gone, not merged
        assert_eq!(store.load().expect("load"), second);
    }

    #[test]
    fn test_load_empty_store() {
        let store = AttributionStore::new(MemoryStore::new());
        assert_eq!(store.load().expect("load"), AttributionRecord::default());
    }

    #[test]
    fn test_unavailable_store_reports_failure() {
        let mut store = AttributionStore::new(UnavailableStore);
        assert!(matches!(
            store.save(&wechat_social()),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(store.load(), Err(StorageError::Unavailable)));
    }

    #[test]
    fn test_store_through_mutable_reference() {
        let mut backend = MemoryStore::new();
        {
            let mut store = AttributionStore::new(&mut backend);
            store.save(&wechat_social()).expect("save");
        }
        assert_eq!(backend.len(), 3);
    }
}
