//! Key-value persistence backends
//!
//! The progress record lives in a single string slot addressed by a fixed key,
//! the same contract a browser's local storage offers. Three backends are
//! provided:
//!
//! - [`MemoryBackend`]: in-process map, with optional quota and a "disabled"
//!   switch for exercising failure paths
//! - [`FileBackend`]: one JSON file per key under a data directory
//! - [`SqliteBackend`]: a `kv` table in a SQLite database

mod file;
mod memory;
mod sqlite;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Error type for backend operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Quota exceeded writing '{key}': {size} bytes (limit {limit})")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    /// Stored bytes exist but are not a readable value
    #[error("Stored value under '{key}' is unreadable: {reason}")]
    InvalidPayload { key: String, reason: String },
}

/// A single-slot-per-key string store
///
/// Implementations must make `set_item` all-or-nothing: when it returns an
/// error, the value previously stored under `key` is still readable.
pub trait StorageBackend {
    /// Read the value stored under `key`, `None` if nothing is stored
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key` (no-op if absent)
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Short backend name for log output
    fn name(&self) -> &'static str;
}

impl StorageBackend for Box<dyn StorageBackend> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Check a value against an optional byte quota
pub(crate) fn check_quota(
    key: &str,
    value: &str,
    limit: Option<usize>,
) -> Result<(), StorageError> {
    match limit {
        Some(limit) if value.len() > limit => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        }),
        _ => Ok(()),
    }
}
