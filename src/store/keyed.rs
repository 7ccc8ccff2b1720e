//! Keyed JSON document store
//!
//! Each key maps to one document file under the data directory:
//!
//! ```text
//! crc32:<8 hex digits>\n
//! <JSON payload>
//! ```
//!
//! The checksum covers the payload bytes. Documents failing the checksum or
//! JSON decode are skipped on open (the default value takes over) and the
//! failure is surfaced through [`KeyedStore::last_error`].

use crate::store::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

/// Configuration for the keyed store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one `<key>.json` file per document
    pub data_dir: PathBuf,
    /// Quota for a single serialized document, in bytes
    pub max_document_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("nutrilog_data"),
            max_document_bytes: 5 * 1024 * 1024, // 5 MiB
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }
}

/// Keyed JSON document store with synchronous persistence
pub struct KeyedStore {
    config: StoreConfig,
    /// Serialized payloads by key; the commit point for every write
    documents: Mutex<HashMap<String, String>>,
    /// Most recent store failure, retained until dismissed
    last_error: RwLock<Option<String>>,
}

impl KeyedStore {
    /// Open a store, loading every readable document from the data directory
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let store = Self {
            config,
            documents: Mutex::new(HashMap::new()),
            last_error: RwLock::new(None),
        };

        store.load_documents()?;
        Ok(store)
    }

    /// Get the value under `key`, or `T::default()` when the key is missing
    /// or the stored document cannot be decoded. Decode failures are
    /// surfaced through [`last_error`](Self::last_error), never thrown.
    pub fn get<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let docs = self.docs();
        match docs.get(key) {
            Some(payload) => match serde_json::from_str(payload) {
                Ok(value) => value,
                Err(e) => {
                    self.record_error(format!("Could not decode document '{}': {}", key, e));
                    T::default()
                }
            },
            None => T::default(),
        }
    }

    /// Atomically update the value under `key`.
    ///
    /// The updater receives the latest known value (or `T::default()` for a
    /// fresh key) and its result becomes the new value. The lock is held
    /// across read, update, serialize, and persist, so no same-process
    /// update is ever lost. On any failure the prior value is retained, the
    /// error is returned, and it is also recorded for [`last_error`].
    pub fn set<T, F>(&self, key: &str, updater: F) -> StoreResult<()>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(T) -> T,
    {
        let mut docs = self.docs();

        let current: T = match docs.get(key) {
            Some(payload) => serde_json::from_str(payload).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "Replacing undecodable document");
                T::default()
            }),
            None => T::default(),
        };

        let updated = updater(current);

        let payload = match serde_json::to_string(&updated) {
            Ok(p) => p,
            Err(e) => {
                let err = StoreError::from(e);
                self.record_error(err.to_string());
                return Err(err);
            }
        };

        if payload.len() > self.config.max_document_bytes {
            let err = StoreError::QuotaExceeded {
                key: key.to_string(),
                size: payload.len(),
                limit: self.config.max_document_bytes,
            };
            self.record_error(err.to_string());
            return Err(err);
        }

        // Identical bytes are already on disk; committing again is a no-op.
        if docs.get(key).map(|p| p == &payload).unwrap_or(false) {
            return Ok(());
        }

        if let Err(err) = self.persist_document(key, &payload) {
            self.record_error(err.to_string());
            return Err(err);
        }

        docs.insert(key.to_string(), payload);
        Ok(())
    }

    /// Most recent store failure, if any. Retained until dismissed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clear the retained failure state.
    pub fn dismiss_error(&self) {
        *self
            .last_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The store's data directory.
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    fn record_error(&self, message: String) {
        tracing::error!(error = %message, "Store error");
        *self
            .last_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(message);
    }

    // A poisoned lock only means an updater panicked before the commit
    // point; the map itself is never left half-mutated.
    fn docs(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.config.data_dir.join(format!("{}.json", key))
    }

    fn persist_document(&self, key: &str, payload: &str) -> StoreResult<()> {
        let path = self.document_path(key);
        let tmp = self.config.data_dir.join(format!("{}.json.tmp", key));

        let checksum = crc32fast::hash(payload.as_bytes());
        let content = format!("crc32:{:08x}\n{}", checksum, payload);

        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_documents(&self) -> StoreResult<()> {
        let mut docs = self.docs();

        for entry in std::fs::read_dir(&self.config.data_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "json").unwrap_or(false) {
                let key = match path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) => stem.to_string(),
                    None => continue,
                };

                match Self::read_document(&path) {
                    Ok(payload) => {
                        docs.insert(key, payload);
                    }
                    Err(e) => {
                        tracing::warn!(key = %key, error = %e, "Skipping unreadable document");
                        self.record_error(format!("Document '{}' unreadable: {}", key, e));
                    }
                }
            }
        }

        Ok(())
    }

    fn read_document(path: &Path) -> StoreResult<String> {
        let content = std::fs::read_to_string(path)?;

        let (header, payload) = content.split_once('\n').ok_or_else(|| {
            StoreError::Corruption(format!("{:?}: missing checksum header", path))
        })?;

        let stored = header
            .strip_prefix("crc32:")
            .and_then(|h| u32::from_str_radix(h, 16).ok())
            .ok_or_else(|| StoreError::Corruption(format!("{:?}: bad checksum header", path)))?;

        let actual = crc32fast::hash(payload.as_bytes());
        if stored != actual {
            return Err(StoreError::Corruption(format!(
                "{:?}: checksum mismatch (stored {:08x}, actual {:08x})",
                path, stored, actual
            )));
        }

        Ok(payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_store(dir: &Path) -> KeyedStore {
        KeyedStore::open(StoreConfig::new(dir)).unwrap()
    }

    #[test]
    fn test_get_missing_returns_default() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());

        let value: Vec<String> = store.get("nothing");
        assert!(value.is_empty());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());

        store
            .set("names", |mut names: Vec<String>| {
                names.push("oatmeal".to_string());
                names
            })
            .unwrap();

        let names: Vec<String> = store.get("names");
        assert_eq!(names, vec!["oatmeal".to_string()]);
    }

    #[test]
    fn test_updater_receives_latest_value() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());

        for i in 0..5u32 {
            store
                .set("counts", move |mut counts: Vec<u32>| {
                    counts.push(i);
                    counts
                })
                .unwrap();
        }

        let counts: Vec<u32> = store.get("counts");
        assert_eq!(counts, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = open_store(dir.path());
            store
                .set("names", |mut names: Vec<String>| {
                    names.push("soup".to_string());
                    names
                })
                .unwrap();
        }

        let store = open_store(dir.path());
        let names: Vec<String> = store.get("names");
        assert_eq!(names, vec!["soup".to_string()]);
    }

    #[test]
    fn test_quota_rejection_retains_prior_value() {
        let dir = tempdir().unwrap();
        let mut config = StoreConfig::new(dir.path());
        config.max_document_bytes = 64;
        let store = KeyedStore::open(config).unwrap();

        store
            .set("doc", |_: String| "small".to_string())
            .unwrap();

        let result = store.set("doc", |_: String| "x".repeat(500));
        assert!(matches!(result, Err(StoreError::QuotaExceeded { .. })));

        // Prior value survives, both in memory and across reopen.
        let value: String = store.get("doc");
        assert_eq!(value, "small");
        assert!(store.last_error().is_some());

        drop(store);
        let reopened = open_store(dir.path());
        let value: String = reopened.get("doc");
        assert_eq!(value, "small");
    }

    #[test]
    fn test_dismiss_error_clears_banner() {
        let dir = tempdir().unwrap();
        let mut config = StoreConfig::new(dir.path());
        config.max_document_bytes = 8;
        let store = KeyedStore::open(config).unwrap();

        let _ = store.set("doc", |_: String| "far too long for the quota".to_string());
        assert!(store.last_error().is_some());

        store.dismiss_error();
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_corrupt_document_falls_back_to_default() {
        let dir = tempdir().unwrap();

        {
            let store = open_store(dir.path());
            store
                .set("names", |mut names: Vec<String>| {
                    names.push("toast".to_string());
                    names
                })
                .unwrap();
        }

        // Flip payload bytes without updating the checksum.
        let path = dir.path().join("names.json");
        let mangled = std::fs::read_to_string(&path)
            .unwrap()
            .replace("toast", "drift");
        std::fs::write(&path, mangled).unwrap();

        let store = open_store(dir.path());
        let names: Vec<String> = store.get("names");
        assert!(names.is_empty());
        assert!(store.last_error().is_some());
    }

    #[test]
    fn test_checksum_round_trip() {
        let dir = tempdir().unwrap();
        let store = open_store(dir.path());

        store.set("doc", |_: String| "payload".to_string()).unwrap();

        let read = KeyedStore::read_document(&dir.path().join("doc.json")).unwrap();
        assert_eq!(read, "\"payload\"");
    }
}
