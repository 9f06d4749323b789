//! Raw key-value port and the in-memory backend

use funnel_core::StoreError;
use std::collections::HashMap;
use std::sync::RwLock;

/// Raw string key-value port. Values are whole JSON documents; a backend
/// never reads or writes anything smaller than one key's full value.
///
/// Implementations must be thread-safe, but callers are expected to be
/// single-threaded: two logical operations racing on the same key resolve
/// as last-writer-wins.
pub trait KvBackend: Send + Sync {
    /// Read the full value under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the full value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend. The default for tests and the reference semantics for
/// every other implementation.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read("sp_deals").unwrap(), None);
    }

    #[test]
    fn test_write_then_read_roundtrips() {
        let backend = MemoryBackend::new();
        backend.write("sp_deals", "[]").unwrap();
        assert_eq!(backend.read("sp_deals").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_write_overwrites_whole_value() {
        let backend = MemoryBackend::new();
        backend.write("sp_tags", "[1,2,3]").unwrap();
        backend.write("sp_tags", "[]").unwrap();
        assert_eq!(backend.read("sp_tags").unwrap().as_deref(), Some("[]"));
    }
}
