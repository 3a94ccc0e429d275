//! SQLite backend
//!
//! Stores values in a `kv` table. The database records its schema version so a
//! newer layout is refused instead of being misread.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use super::{check_quota, StorageBackend, StorageError};

/// Layout written by this version of the crate
const SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

INSERT OR IGNORE INTO schema_version VALUES (1);
"#;

/// Key-value table in a SQLite database
pub struct SqliteBackend {
    conn: Connection,
    max_value_bytes: Option<usize>,
}

impl SqliteBackend {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let backend = Self {
            conn,
            max_value_bytes: None,
        };
        backend.init_schema()?;
        Ok(backend)
    }

    pub fn with_quota(mut self, limit: Option<usize>) -> Self {
        self.max_value_bytes = limit;
        self
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(SCHEMA_SQL)?;

        let version = self.schema_version()?;
        if version > SCHEMA_VERSION {
            return Err(StorageError::Unavailable(format!(
                "database schema v{} is newer than supported v{}",
                version, SCHEMA_VERSION
            )));
        }
        Ok(())
    }

    /// Highest schema version recorded in the database
    pub fn schema_version(&self) -> Result<i32, StorageError> {
        let version = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )?;
        Ok(version)
    }

    /// Last write time (ms since epoch) of `key`
    pub fn updated_at(&self, key: &str) -> Result<Option<i64>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional()?;
        Ok(value)
    }
}

impl StorageBackend for SqliteBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(key, value, self.max_value_bytes)?;
        let now = Utc::now().timestamp_millis();
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            "#,
            rusqlite::params![key, value, now],
        )?;
        debug!("Stored {} bytes under '{}' in sqlite", value.len(), key);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_backend_upsert() {
        let mut backend = SqliteBackend::open_in_memory().unwrap();

        assert_eq!(backend.get_item("k").unwrap(), None);
        backend.set_item("k", "one").unwrap();
        backend.set_item("k", "two").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("two"));
        assert!(backend.updated_at("k").unwrap().is_some());

        backend.remove_item("k").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), None);
        assert_eq!(backend.updated_at("k").unwrap(), None);
    }

    #[test]
    fn test_sqlite_backend_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("progress.db");

        {
            let mut backend = SqliteBackend::open(&db_path).unwrap();
            backend.set_item("k", "kept").unwrap();
        }

        let backend = SqliteBackend::open(&db_path).unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_sqlite_backend_refuses_newer_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("progress.db");

        {
            let backend = SqliteBackend::open(&db_path).unwrap();
            assert_eq!(backend.schema_version().unwrap(), SCHEMA_VERSION);
            backend
                .conn
                .execute("INSERT INTO schema_version VALUES (?1)", [SCHEMA_VERSION + 1])
                .unwrap();
        }

        assert!(matches!(
            SqliteBackend::open(&db_path),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn test_sqlite_backend_quota() {
        let mut backend = SqliteBackend::open_in_memory().unwrap().with_quota(Some(2));
        backend.set_item("k", "ok").unwrap();
        assert!(matches!(
            backend.set_item("k", "too long"),
            Err(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("ok"));
    }
}
