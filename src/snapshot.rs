//! Versioned JSON envelope for persisted selection records.
//!
//! Every selection store writes its items wrapped in this envelope so a
//! future build can detect records it no longer understands instead of
//! silently misreading them.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Envelope version this build reads and writes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a selection set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Envelope version tag.
    pub version: u32,
    /// Identifiers in insertion order.
    pub items: Vec<String>,
}

impl Snapshot {
    /// Wrap `items` in a current-version envelope.
    pub fn new(items: Vec<String>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            items,
        }
    }

    /// Encode to the JSON wire form stored by the backend.
    pub fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored record, rejecting envelope versions this build does
    /// not understand.
    pub fn decode(key: &str, raw: &str) -> Result<Self, StorageError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StorageError::Corrupt {
                key: key.to_string(),
                reason: format!("unsupported snapshot version {}", snapshot.version),
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let snapshot = Snapshot::new(vec!["gpu-4080".to_string(), "gpu-4090".to_string()]);
        let raw = snapshot.encode().unwrap();
        let decoded = Snapshot::decode("compare-list", &raw).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let raw = r#"{"version":9,"items":["a"]}"#;
        let err = Snapshot::decode("compare-list", raw).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = Snapshot::decode("compare-list", "not json").unwrap_err();
        assert!(matches!(err, StorageError::Serialize(_)));
    }

    #[test]
    fn test_empty_items_round_trip() {
        let raw = Snapshot::new(Vec::new()).encode().unwrap();
        let decoded = Snapshot::decode("compare-list", &raw).unwrap();
        assert!(decoded.items.is_empty());
    }
}
