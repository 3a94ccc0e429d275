//! Load and save of the whole progress record
//!
//! Neither operation ever fails to the caller. Problems are logged and surfaced
//! through [`LoadOutcome`] / [`SaveOutcome`] so callers can inspect them, but
//! the worst case is always "no progress shown", never a crash.

use tracing::{debug, warn};

use super::model::ProgressRecord;
use crate::storage::{StorageBackend, StorageError};

/// Storage key of the progress record
pub const PROGRESS_KEY: &str = "workshop_progress";

/// Why a load produced an empty record even though it was asked for data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    /// Stored payload is not a valid progress record
    Corrupt(String),
    /// Backend could not be read
    Unavailable(String),
}

impl std::fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupt(msg) => write!(f, "stored progress is corrupt: {}", msg),
            Self::Unavailable(msg) => write!(f, "progress storage unavailable: {}", msg),
        }
    }
}

/// Result of [`ProgressStore::load_outcome`]
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A stored record was read
    Stored(ProgressRecord),
    /// Nothing stored yet
    Empty,
    /// Something was wrong; treat as empty
    Recovered { diagnostic: LoadDiagnostic },
}

impl LoadOutcome {
    pub fn into_record(self) -> ProgressRecord {
        match self {
            Self::Stored(record) => record,
            Self::Empty | Self::Recovered { .. } => ProgressRecord::new(),
        }
    }

    pub fn diagnostic(&self) -> Option<&LoadDiagnostic> {
        match self {
            Self::Recovered { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }
}

/// Result of [`ProgressStore::save`] and [`ProgressStore::clear`]
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    /// Write failed; the previously stored value is untouched
    Failed(StorageError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Reads and writes the progress record in one backend slot
pub struct ProgressStore<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> ProgressStore<B> {
    /// Store using the standard [`PROGRESS_KEY`]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, PROGRESS_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Load the record, falling back to an empty one on any problem
    pub fn load(&self) -> ProgressRecord {
        self.load_outcome().into_record()
    }

    /// Load the record and report how it went
    pub fn load_outcome(&self) -> LoadOutcome {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored progress under '{}'", self.key);
                return LoadOutcome::Empty;
            }
            Err(StorageError::InvalidPayload { reason, .. }) => {
                warn!("Stored progress is unreadable, starting empty: {}", reason);
                return LoadOutcome::Recovered {
                    diagnostic: LoadDiagnostic::Corrupt(reason),
                };
            }
            Err(e) => {
                warn!(
                    "Failed to read progress from {} storage: {}",
                    self.backend.name(),
                    e
                );
                return LoadOutcome::Recovered {
                    diagnostic: LoadDiagnostic::Unavailable(e.to_string()),
                };
            }
        };

        match ProgressRecord::from_json(&raw) {
            Ok(record) => {
                debug!(
                    "Loaded progress for {} module(s) from {} storage",
                    record.modules.len(),
                    self.backend.name()
                );
                LoadOutcome::Stored(record)
            }
            Err(e) => {
                warn!("Failed to parse stored progress, starting empty: {}", e);
                LoadOutcome::Recovered {
                    diagnostic: LoadDiagnostic::Corrupt(e.to_string()),
                }
            }
        }
    }

    /// Persist the whole record, replacing whatever was stored
    pub fn save(&mut self, record: &ProgressRecord) -> SaveOutcome {
        let json = match record.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize progress: {}", e);
                return SaveOutcome::Failed(StorageError::Unavailable(e.to_string()));
            }
        };

        match self.backend.set_item(&self.key, &json) {
            Ok(()) => {
                debug!("Saved progress ({} bytes)", json.len());
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!(
                    "Failed to save progress to {} storage: {}",
                    self.backend.name(),
                    e
                );
                SaveOutcome::Failed(e)
            }
        }
    }

    /// Delete the stored record
    pub fn clear(&mut self) -> SaveOutcome {
        match self.backend.remove_item(&self.key) {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => {
                warn!("Failed to clear stored progress: {}", e);
                SaveOutcome::Failed(e)
            }
        }
    }
}
