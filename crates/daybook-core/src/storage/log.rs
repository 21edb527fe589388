//! Append-only journal log
//!
//! Owns the on-disk journal file. Appends are whole serialized blocks and
//! are synced to disk before success is reported; append is the only
//! mutation, so a failed write never corrupts already-written content.
//!
//! `append` assumes a single caller (the background writer) and performs no
//! internal locking.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StorageError, StorageResult};
use crate::codec;
use crate::models::Entry;

/// The append-only journal file and its read/write operations
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    /// Create a store for the journal file at `path`
    ///
    /// The file itself is created lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the journal file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a serialized block, syncing to disk before returning
    pub fn append(&self, block: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::from_io(e, self.path.clone()))?;

        file.write_all(block.as_bytes())
            .map_err(|e| StorageError::from_io(e, self.path.clone()))?;
        file.sync_all()
            .map_err(|e| StorageError::from_io(e, self.path.clone()))?;

        debug!("Appended {} byte block to {}", block.len(), self.path.display());
        Ok(())
    }

    /// Read the whole journal, oldest first
    ///
    /// A missing file is an empty journal, not an error. Malformed regions
    /// are skipped by the codec.
    pub fn load_all(&self) -> StorageResult<Vec<Entry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let entries = codec::parse(&text);
        debug!("Loaded {} entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(ts: &str, title: &str, content: &str) -> Entry {
        Entry::from_parts(ts, title, content)
    }

    #[test]
    fn test_load_all_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path().join("entries.txt"));

        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path().join("entries.txt"));

        let a = entry("2024-06-01 09:00:00", "First", "aaa");
        let b = entry("2024-06-01 10:00:00", "Second", "bbb");
        store.append(&codec::serialize(&a)).unwrap();
        store.append(&codec::serialize(&b)).unwrap();

        assert_eq!(store.load_all().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("entries.txt");
        let store = LogStore::new(&path);

        let a = entry("2024-06-01 09:00:00", "First", "aaa");
        store.append(&codec::serialize(&a)).unwrap();

        assert!(path.exists());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_append_to_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        // The journal path is an existing directory; opening it for append
        // must fail and report a typed error.
        let store = LogStore::new(temp_dir.path());

        assert!(store.append("block").is_err());
    }

    #[test]
    fn test_load_all_from_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path());

        assert!(matches!(
            store.load_all(),
            Err(StorageError::ReadError { .. })
        ));
    }

    #[test]
    fn test_failed_append_leaves_existing_content_intact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.txt");
        let store = LogStore::new(&path);

        let a = entry("2024-06-01 09:00:00", "First", "aaa");
        store.append(&codec::serialize(&a)).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let bad = LogStore::new(temp_dir.path());
        assert!(bad.append("block").is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
