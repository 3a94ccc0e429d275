//! Learnpath - workshop progress tracking
//!
//! Learnpath keeps a learner's progress through coding workshops in a single
//! persisted record: completion counts, best scores and saved solution code.
//! Saved code written before workshops supported multiple solution approaches
//! is upgraded lazily the first time an approach is requested, so old progress
//! stays readable.
//!
//! ## Layers
//!
//! 1. **Storage**: a key-value slot ([`storage::StorageBackend`]) backed by
//!    memory, JSON files or SQLite.
//!
//! 2. **Progress**: the record model, load/save that never fails to the
//!    caller, the saved-code migrator and the session that owns the record.
//!
//! 3. **Achievements**: progress toward caller-defined conditions, ranking
//!    and summaries for display.

pub mod achievements;
pub mod config;
pub mod progress;
pub mod storage;

pub use config::Config;
pub use progress::{ProgressRecord, ProgressSession, ProgressStore};
