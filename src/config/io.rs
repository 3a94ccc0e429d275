//! Configuration file I/O and backend construction

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{BackendKind, Config};
use crate::progress::ProgressStore;
use crate::storage::{FileBackend, MemoryBackend, SqliteBackend, StorageBackend};

impl Config {
    /// Get the global config directory path (~/.learnpath/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".learnpath")
    }

    /// Get the global config file path (~/.learnpath/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path`, or the global config if `None`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::global_config_path);

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Data directory for storage backends
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| Self::global_config_dir().join("data"))
    }

    /// Build the configured storage backend
    pub fn open_backend(&self) -> Result<Box<dyn StorageBackend>> {
        let data_dir = self.data_dir();
        let quota = self.storage.max_value_bytes;

        let backend: Box<dyn StorageBackend> = match self.storage.backend {
            BackendKind::File => Box::new(
                FileBackend::open(&data_dir)
                    .with_context(|| format!("Failed to open data dir: {}", data_dir.display()))?
                    .with_quota(quota),
            ),
            BackendKind::Sqlite => {
                let db_path = data_dir.join("progress.db");
                Box::new(
                    SqliteBackend::open(&db_path)
                        .with_context(|| format!("Failed to open database: {}", db_path.display()))?
                        .with_quota(quota),
                )
            }
            BackendKind::Memory => Box::new(match quota {
                Some(limit) => MemoryBackend::with_quota(limit),
                None => MemoryBackend::new(),
            }),
        };

        info!(
            "Using {} storage in {}",
            self.storage.backend,
            data_dir.display()
        );
        Ok(backend)
    }

    /// Progress store over the configured backend and key
    pub fn open_store(&self) -> Result<ProgressStore<Box<dyn StorageBackend>>> {
        Ok(ProgressStore::with_key(
            self.open_backend()?,
            self.storage.key.clone(),
        ))
    }
}
