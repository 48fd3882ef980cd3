//! File-backed JSON key-value store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::StorageError;

/// Name of the store file inside the data directory.
const STORE_FILE: &str = "storage.json";

/// A durable string-key to JSON-value store backed by a single file.
///
/// Every operation goes to disk: reads load the file fresh, writes perform a
/// read-modify-write cycle and replace the file atomically (temp file +
/// rename), so a crash mid-write never leaves a half-written store. An
/// internal async mutex serializes the cycles across cloned handles.
///
/// This struct is cheaply cloneable; clones share the same underlying file
/// and lock.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<JsonStoreInner>,
}

struct JsonStoreInner {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open (or create) a store in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the data directory cannot be created.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(StorageError::Write)?;

        let path = data_dir.join(STORE_FILE);
        debug!(path = %path.display(), "opened key-value store");

        Ok(Self {
            inner: Arc::new(JsonStoreInner {
                path,
                lock: Mutex::new(()),
            }),
        })
    }

    /// Read the value stored under `key`, if any.
    ///
    /// A value that exists but no longer deserializes into `T` is treated as
    /// absent (logged at WARN), per the lenient-recovery policy.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if device storage cannot be read.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let _guard = self.inner.lock.lock().await;
        let entries = self.read_entries().await?;

        let Some(value) = entries.get(key) else {
            return Ok(None);
        };

        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                warn!(key, error = %e, "persisted value is malformed, treating as absent");
                Ok(None)
            }
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if the value cannot be serialized, or
    /// `StorageError::Read`/`StorageError::Write` if the store file cannot be
    /// updated.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let _guard = self.inner.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_owned(), serde_json::to_value(value)?);
        self.write_entries(&entries).await
    }

    /// Remove the value stored under `key`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read`/`StorageError::Write` if the store file
    /// cannot be updated.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_many(&[key]).await
    }

    /// Remove several keys in one write. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read`/`StorageError::Write` if the store file
    /// cannot be updated.
    pub async fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.inner.lock.lock().await;
        let mut entries = self.read_entries().await?;
        for key in keys {
            entries.remove(*key);
        }
        self.write_entries(&entries).await
    }

    /// Load the full entry map from disk.
    ///
    /// A missing file is an empty store; a corrupt file is logged and also
    /// treated as empty (the next successful write replaces it).
    async fn read_entries(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.inner.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Read(e)),
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    path = %self.inner.path.display(),
                    error = %e,
                    "store file is corrupt, starting from an empty store"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    /// Replace the store file with `entries`, atomically.
    async fn write_entries(&self, entries: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec_pretty(entries)?;

        let tmp_path = self.inner.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &encoded)
            .await
            .map_err(StorageError::Write)?;
        tokio::fs::rename(&tmp_path, &self.inner.path)
            .await
            .map_err(StorageError::Write)?;

        debug!(keys = entries.len(), "persisted store snapshot");
        Ok(())
    }
}
