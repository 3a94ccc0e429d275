//! Storage settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::progress::PROGRESS_KEY;

/// Which [`StorageBackend`](crate::storage::StorageBackend) to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per key
    #[default]
    File,
    /// `progress.db` SQLite database
    Sqlite,
    /// Nothing survives the process; useful for dry runs
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory (default: ~/.learnpath/data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Key the progress record is stored under
    #[serde(default = "default_key")]
    pub key: String,

    /// Reject records larger than this many bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value_bytes: Option<usize>,
}

fn default_key() -> String {
    PROGRESS_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: None,
            key: default_key(),
            max_value_bytes: None,
        }
    }
}
