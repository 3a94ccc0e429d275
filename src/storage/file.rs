//! JSON-file backend
//!
//! Each key maps to `<data_dir>/<key>.json`, with every byte outside
//! `[A-Za-z0-9_-]` percent-encoded so distinct keys never share a file. Writes
//! take an exclusive lock on the directory's single `.lock` file and go through
//! a temp file + rename, so a crash never leaves a half-written value behind.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::{check_quota, StorageBackend, StorageError};

const LOCK_FILE: &str = ".lock";

/// Directory of one-file-per-key values
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
    max_value_bytes: Option<usize>,
}

impl FileBackend {
    /// Open (and create if needed) a backend rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            max_value_bytes: None,
        })
    }

    pub fn with_quota(mut self, limit: Option<usize>) -> Self {
        self.max_value_bytes = limit;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the value file for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                Err(StorageError::InvalidPayload {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(key, value, self.max_value_bytes)?;

        let path = self.path_for(key);
        let lock_path = self.dir.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)?;

        // Blocks until any other writer is done
        lock_file.lock_exclusive()?;

        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.sync_all()?;

        std::fs::rename(&temp_path, &path)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());

        // Lock is released when lock_file is dropped
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// File-name-safe, injective encoding of `key`
fn encode_key(key: &str) -> String {
    if key.is_empty() {
        // Never produced for a non-empty key, every escape is `%XX`
        return "%".to_string();
    }

    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_backend_roundtrip() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();

        assert_eq!(backend.get_item("progress").unwrap(), None);
        backend.set_item("progress", "{\"a\":1}").unwrap();
        assert_eq!(
            backend.get_item("progress").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.path().join("progress.json").exists());
        assert!(!dir.path().join("progress.json.tmp").exists());

        backend.remove_item("progress").unwrap();
        assert_eq!(backend.get_item("progress").unwrap(), None);
        // Removing twice is fine
        backend.remove_item("progress").unwrap();
    }

    #[test]
    fn test_file_backend_quota() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap().with_quota(Some(4));

        backend.set_item("k", "1234").unwrap();
        assert!(backend.set_item("k", "12345").is_err());
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("workshop_progress"), "workshop_progress");
        assert_eq!(encode_key("../etc/passwd"), "%2E%2E%2Fetc%2Fpasswd");
        assert_eq!(encode_key("a.b"), "a%2Eb");
        assert_eq!(encode_key(""), "%");
    }

    #[test]
    fn test_similar_keys_stay_distinct() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();

        backend.set_item("a.b", "dot").unwrap();
        backend.set_item("a_b", "underscore").unwrap();
        backend.set_item("a%2Eb", "escaped").unwrap();

        assert_eq!(backend.get_item("a.b").unwrap().as_deref(), Some("dot"));
        assert_eq!(backend.get_item("a_b").unwrap().as_deref(), Some("underscore"));
        assert_eq!(backend.get_item("a%2Eb").unwrap().as_deref(), Some("escaped"));

        // Values plus the one shared lock file
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 4);
        assert!(dir.path().join(LOCK_FILE).exists());
    }

    #[test]
    fn test_invalid_utf8_is_invalid_payload() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        std::fs::write(backend.path_for("k"), [0xff, 0xfe, b'{']).unwrap();

        assert!(matches!(
            backend.get_item("k"),
            Err(StorageError::InvalidPayload { .. })
        ));
    }
}
