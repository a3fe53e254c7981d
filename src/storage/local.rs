//! Browser LocalStorage backend (wasm32 only).
//!
//! The `web_sys::Storage` handle is re-acquired per call rather than held,
//! so the backend stays `Send + Sync` and works from any context that can
//! reach `window`.

use super::StorageBackend;
use crate::error::StorageError;

/// Persists records in `window.localStorage`.
#[derive(Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("window.localStorage".to_string()))
    }
}

impl StorageBackend for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable(format!("read of {key:?} rejected")))
    }

    fn save(&self, key: &str, record: &str) -> Result<(), StorageError> {
        // set_item fails when the origin's quota is exhausted
        Self::storage()?
            .set_item(key, record)
            .map_err(|_| StorageError::Unavailable(format!("write of {key:?} rejected")))
    }
}
