//! Persisted learner progress
//!
//! Tracks per-module completion counts, best scores and saved solution code in
//! a single record stored under one key of a [`StorageBackend`].
//!
//! # Usage
//!
//! ```ignore
//! let store = ProgressStore::new(FileBackend::open(data_dir)?);
//! let mut session = ProgressSession::open(store);
//!
//! // Prefill an editor (migrates legacy entries on first approach read)
//! let code = session.saved_code("python_basics", "basics_01", Some("comprehension"));
//!
//! session.record_score("python_basics", "basics_01", 100);
//! ```
//!
//! [`StorageBackend`]: crate::storage::StorageBackend

mod code;
mod model;
mod recorder;
mod session;
mod store;

pub use code::{get_saved_code, save_code};
pub use model::{CodeEntry, ModuleProgress, ProgressRecord};
pub use recorder::MAX_SCORE;
pub use session::ProgressSession;
pub use store::{LoadDiagnostic, LoadOutcome, ProgressStore, SaveOutcome, PROGRESS_KEY};

/// Errors from progress mutations
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error(
        "Workshop {module_id}/{workshop_id} stores code per approach; an approach id is required"
    )]
    ShapeConflict {
        module_id: String,
        workshop_id: String,
    },
}
