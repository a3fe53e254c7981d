//! In-process backend for tests and ephemeral sessions.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::StorageBackend;
use crate::error::StorageError;

/// Keeps records in a process-local map. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.lock().get(key).cloned())
    }

    fn save(&self, key: &str, record: &str) -> Result<(), StorageError> {
        self.records
            .lock()
            .insert(key.to_string(), record.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key() {
        let storage = MemoryStorage::new();
        assert!(storage.load("compare-list").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        storage.save("compare-list", r#"{"version":1,"items":[]}"#).unwrap();
        assert_eq!(
            storage.load("compare-list").unwrap().as_deref(),
            Some(r#"{"version":1,"items":[]}"#)
        );
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let storage = MemoryStorage::new();
        storage.save("k", "first").unwrap();
        storage.save("k", "second").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("second"));
        assert_eq!(storage.len(), 1);
    }
}
