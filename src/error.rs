//! Error taxonomy for stores and storage backends.
//!
//! Capacity-exceeded and duplicate adds are deliberately absent here: both
//! are absorbed as no-ops by the store rather than surfaced as errors.

use thiserror::Error;

/// Failures raised by a [`StorageBackend`](crate::storage::StorageBackend).
///
/// These never abort a store operation: the in-memory mutation stays applied
/// and the failure is reported through the store's error hook and the log.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing storage is not reachable in this environment, or it
    /// rejected a write (e.g. quota exhausted).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying read or write failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized or deserialized.
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A record exists under `key` but is not one this build understands.
    #[error("corrupt record under {key:?}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Caller-facing errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Empty, whitespace-only, or control-character identifier.
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),

    /// Stores require room for at least one item.
    #[error("invalid capacity {0}, must be at least 1")]
    InvalidCapacity(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Corrupt {
            key: "compare-list".to_string(),
            reason: "unsupported snapshot version 9".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "corrupt record under \"compare-list\": unsupported snapshot version 9"
        );
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::InvalidIdentifier("\n".to_string()).to_string(),
            "invalid identifier \"\\n\""
        );
        assert_eq!(
            StoreError::InvalidCapacity(0).to_string(),
            "invalid capacity 0, must be at least 1"
        );
    }
}
