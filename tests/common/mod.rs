//! Shared test utilities for progress storage tests

#![allow(dead_code)]

use std::path::Path;

use learnpath::progress::{ProgressStore, PROGRESS_KEY};
use learnpath::storage::{FileBackend, SqliteBackend, StorageBackend};

/// Solution saved by a learner before workshops had approaches
pub const LEGACY_CODE: &str = "def even_squares(nums): ...";

/// Progress payload in the pre-approach format
pub fn legacy_payload() -> String {
    serde_json::json!({
        "python_basics": {
            "completed": 1,
            "scores": { "basics_01": 80 },
            "code": { "basics_01": LEGACY_CODE }
        },
        "oop": {
            "completed": 0,
            "scores": {},
            "code": { "oop_01": "class Account: ..." }
        }
    })
    .to_string()
}

/// File-backed store pre-seeded with the legacy payload
pub fn legacy_file_store(dir: &Path) -> ProgressStore<FileBackend> {
    let mut backend = FileBackend::open(dir).expect("Failed to open file backend");
    backend
        .set_item(PROGRESS_KEY, &legacy_payload())
        .expect("Failed to seed legacy payload");
    ProgressStore::new(backend)
}

/// SQLite-backed store pre-seeded with the legacy payload
pub fn legacy_sqlite_store(db_path: &Path) -> ProgressStore<SqliteBackend> {
    let mut backend = SqliteBackend::open(db_path).expect("Failed to open sqlite backend");
    backend
        .set_item(PROGRESS_KEY, &legacy_payload())
        .expect("Failed to seed legacy payload");
    ProgressStore::new(backend)
}
