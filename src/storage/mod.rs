//! Pluggable persistence backends.
//!
//! A store owns exactly one key in its backend: `load` runs once at
//! construction and `save` once per committed mutation. Backends are
//! best-effort durable; a failed save never rolls back the store's
//! in-memory state.

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::error::StorageError;

/// Durable key-value persistence consumed by the stores.
pub trait StorageBackend: Send + Sync {
    /// The last record saved under `key`, or `None` on first run.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Best-effort durable write of `record` under `key`.
    fn save(&self, key: &str, record: &str) -> Result<(), StorageError>;
}
