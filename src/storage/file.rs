//! JSON-file-per-key backend for native builds.
//!
//! Each record is written to a temp file and renamed into place, so a crash
//! mid-write leaves the previous record intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use super::StorageBackend;
use crate::error::StorageError;

/// Persists each key as `<dir>/<key>.json`.
///
/// Keys are expected to be plain file-name-safe literals (the stores use
/// fixed names like `"compare-list"`).
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open a backend rooted at `dir`, creating the directory if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::info!("file storage at {}", dir.display());
        Ok(Self { dir })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, record: &str) -> Result<(), StorageError> {
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let mut f = fs::File::create(&tmp)?;
        f.write_all(record.as_bytes())?;
        f.sync_all()?;
        fs::rename(&tmp, self.record_path(key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(storage.load("compare-list").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.save("compare-list", r#"{"version":1,"items":["a"]}"#).unwrap();
        assert_eq!(
            storage.load("compare-list").unwrap().as_deref(),
            Some(r#"{"version":1,"items":["a"]}"#)
        );
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FileStorage::open(dir.path()).unwrap();
            storage.save("compare-list", "record").unwrap();
        }
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.load("compare-list").unwrap().as_deref(), Some("record"));
    }

    #[test]
    fn test_no_leftover_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.save("k", "record").unwrap();
        assert!(!dir.path().join("k.json.tmp").exists());
        assert!(dir.path().join("k.json").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("client");
        let storage = FileStorage::open(&nested).unwrap();
        storage.save("k", "record").unwrap();
        assert!(nested.join("k.json").exists());
    }
}
