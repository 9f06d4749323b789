//! Typed collection adapter
//!
//! Wraps a [`KvBackend`] with typed get/create/update/remove primitives over
//! whole JSON-array collections, plus object accessors for the settings
//! singleton.
//!
//! Failure policy: this layer never panics and never returns `Err`. Backend
//! faults and malformed JSON are logged and degrade to `[]`/`None`; a missing
//! id on update logs a warning and returns `None`. Services build their loud
//! domain errors on top of these defaults.

use crate::backend::{KvBackend, MemoryBackend};
use chrono::Utc;
use funnel_core::{new_entity_id, EntityId, Record};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed store over a raw key-value backend.
pub struct Store {
    backend: Box<dyn KvBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Store over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    // === Raw access (backup/restore and tests) ===

    /// Read the raw JSON under `key`. Faults log and return `None`.
    pub fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.read(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key, error = %e, "storage read failed");
                None
            }
        }
    }

    /// Overwrite the raw JSON under `key`. Faults log and are swallowed.
    pub fn write_raw(&self, key: &str, value: &str) {
        if let Err(e) = self.backend.write(key, value) {
            tracing::error!(key, error = %e, "storage write failed");
        }
    }

    // === Array collections ===

    /// All records under `T`'s key. Missing or corrupt data yields `[]`.
    pub fn get_all<T: Record>(&self) -> Vec<T> {
        let Some(raw) = self.read_raw(T::KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(key = T::KEY, error = %e, "corrupt collection, returning empty");
                Vec::new()
            }
        }
    }

    /// One record by id, or `None`.
    pub fn get_by_id<T: Record>(&self, id: EntityId) -> Option<T> {
        self.get_all::<T>().into_iter().find(|item| item.id() == id)
    }

    /// Full overwrite of `T`'s collection.
    pub fn save<T: Record>(&self, items: &[T]) {
        match serde_json::to_string(items) {
            Ok(raw) => self.write_raw(T::KEY, &raw),
            Err(e) => tracing::error!(key = T::KEY, error = %e, "serialize failed, collection not saved"),
        }
    }

    /// Append a record, stamping a fresh id and creation time.
    pub fn create<T: Record>(&self, mut item: T) -> T {
        item.stamp_created(new_entity_id(), Utc::now());
        let mut items = self.get_all::<T>();
        items.push(item.clone());
        self.save(&items);
        item
    }

    /// Mutate the record with `id` in place and re-stamp its update time.
    /// Returns the updated record, or `None` (with a warning) if absent.
    pub fn update<T: Record>(&self, id: EntityId, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut items = self.get_all::<T>();
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            tracing::warn!(key = T::KEY, %id, "update target not found");
            return None;
        };
        apply(item);
        item.stamp_updated(Utc::now());
        let updated = item.clone();
        self.save(&items);
        Some(updated)
    }

    /// Remove the record with `id`. No-op if absent.
    pub fn remove<T: Record>(&self, id: EntityId) {
        let items = self.get_all::<T>();
        let kept: Vec<T> = items.into_iter().filter(|item| item.id() != id).collect();
        self.save(&kept);
    }

    /// Write `items` only if the collection is currently empty. Bootstrap
    /// uses this so user data is never clobbered.
    pub fn seed_if_empty<T: Record>(&self, items: &[T]) {
        if self.get_all::<T>().is_empty() {
            self.save(items);
        }
    }

    // === Singleton objects ===

    /// Read a non-array record (settings). Missing or corrupt yields `None`.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(key, error = %e, "corrupt object, returning none");
                None
            }
        }
    }

    /// Overwrite a non-array record.
    pub fn save_object<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write_raw(key, &raw),
            Err(e) => tracing::error!(key, error = %e, "serialize failed, object not saved"),
        }
    }
}
