//! JSON-file backend
//!
//! Persists the entire keyed dataset as one JSON object on disk, rewritten
//! whole on every mutation. The document shape is identical to the backup
//! wire format: top-level keys are storage keys, values are the stored JSON.

use crate::backend::KvBackend;
use funnel_core::StoreError;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Disk-backed implementation of [`KvBackend`].
///
/// All reads are served from an in-memory cache loaded once at open time;
/// every write updates the cache and rewrites the file synchronously.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileBackend {
    /// Open (or create) the datastore at `path`.
    ///
    /// A missing file starts empty. A file that is not a JSON object is
    /// refused loudly here, at the one point where the caller can still
    /// choose not to proceed; after open, faults degrade softly like every
    /// other backend.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut cache = HashMap::new();

        if path.exists() {
            let text = std::fs::read_to_string(&path).map_err(|e| StoreError::ReadFailed {
                key: path.display().to_string(),
                reason: e.to_string(),
            })?;
            if !text.trim().is_empty() {
                let doc: Value = serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
                    key: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                let obj = doc.as_object().ok_or_else(|| StoreError::Corrupt {
                    key: path.display().to_string(),
                    reason: "top-level value is not an object".to_string(),
                })?;
                for (key, value) in obj {
                    cache.insert(key.clone(), value.to_string());
                }
            }
        }

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    fn flush(&self, cache: &HashMap<String, String>) -> Result<(), StoreError> {
        let mut doc = serde_json::Map::new();
        for (key, raw) in cache {
            let value: Value = serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            doc.insert(key.clone(), value);
        }
        let text = serde_json::to_string_pretty(&Value::Object(doc)).map_err(|e| {
            StoreError::WriteFailed {
                key: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, text).map_err(|e| StoreError::WriteFailed {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl KvBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let cache = self.cache.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(cache.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Refuse non-JSON values up front so the on-disk document stays well formed.
        serde_json::from_str::<Value>(value).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        let mut cache = self.cache.write().map_err(|_| StoreError::LockPoisoned)?;
        cache.insert(key.to_string(), value.to_string());
        self.flush(&cache)
    }
}
