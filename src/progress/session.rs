//! Session-scoped owner of the progress record
//!
//! One session loads the record once and is the only writer for as long as it
//! lives. Every mutation is followed by a full save, except while the session
//! started from an unreadable backend: then the stored record may still hold
//! real progress, so nothing is written until an explicit [`ProgressSession::clear`].

use tracing::warn;

use super::code::{lookup_code, save_code};
use super::model::ProgressRecord;
use super::store::{LoadDiagnostic, ProgressStore, SaveOutcome};
use super::ProgressError;
use crate::storage::{StorageBackend, StorageError};

pub struct ProgressSession<B: StorageBackend> {
    store: ProgressStore<B>,
    record: ProgressRecord,
    load_diagnostic: Option<LoadDiagnostic>,
    persist: bool,
}

impl<B: StorageBackend> ProgressSession<B> {
    /// Load the record from `store` and take ownership of both
    pub fn open(store: ProgressStore<B>) -> Self {
        let outcome = store.load_outcome();
        let load_diagnostic = outcome.diagnostic().cloned();
        let persist = !matches!(load_diagnostic, Some(LoadDiagnostic::Unavailable(_)));
        if !persist {
            warn!("Progress could not be read; changes in this session will not be saved");
        }
        Self {
            store,
            record: outcome.into_record(),
            load_diagnostic,
            persist,
        }
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn store(&self) -> &ProgressStore<B> {
        &self.store
    }

    /// Why the session started empty, if loading hit a problem
    pub fn load_diagnostic(&self) -> Option<&LoadDiagnostic> {
        self.load_diagnostic.as_ref()
    }

    /// Whether mutations are written back to the store
    pub fn is_persisting(&self) -> bool {
        self.persist
    }

    /// See [`get_saved_code`](super::get_saved_code)
    pub fn saved_code(
        &mut self,
        module_id: &str,
        workshop_id: &str,
        approach_id: Option<&str>,
    ) -> Option<String> {
        let (code, migrated) = lookup_code(&mut self.record, module_id, workshop_id, approach_id);
        if migrated {
            self.persist_record();
        }
        code
    }

    /// Save code in the current format and persist
    pub fn save_code(
        &mut self,
        module_id: &str,
        workshop_id: &str,
        approach_id: Option<&str>,
        code: &str,
    ) -> Result<SaveOutcome, ProgressError> {
        save_code(&mut self.record, module_id, workshop_id, approach_id, code)?;
        Ok(self.persist_record())
    }

    /// Record a score; persists only if the best score changed
    pub fn record_score(&mut self, module_id: &str, workshop_id: &str, score: i64) -> bool {
        let changed = self.record.record_score(module_id, workshop_id, score);
        if changed {
            self.persist_record();
        }
        changed
    }

    /// Count a completed workshop and persist, returning the new count
    pub fn mark_completed(&mut self, module_id: &str) -> u32 {
        let count = self.record.mark_completed(module_id);
        self.persist_record();
        count
    }

    /// Explicit reset: drop the stored record and start empty
    pub fn clear(&mut self) -> SaveOutcome {
        self.record = ProgressRecord::new();
        let outcome = self.store.clear();
        if outcome.is_saved() {
            self.persist = true;
        }
        outcome
    }

    fn persist_record(&mut self) -> SaveOutcome {
        if !self.persist {
            return SaveOutcome::Failed(StorageError::Unavailable(
                "stored progress was unreadable at session start".to_string(),
            ));
        }
        self.store.save(&self.record)
    }

    pub fn into_store(self) -> ProgressStore<B> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::store::PROGRESS_KEY;
    use crate::storage::MemoryBackend;

    #[test]
    fn test_session_persists_each_mutation() {
        let mut session = ProgressSession::open(ProgressStore::new(MemoryBackend::new()));
        assert!(session.load_diagnostic().is_none());

        session.mark_completed("m");
        assert!(session.record_score("m", "w", 70));
        assert!(session.save_code("m", "w", Some("loop"), "code").unwrap().is_saved());

        let reloaded = session.store().load();
        assert_eq!(&reloaded, session.record());
        assert_eq!(reloaded.module("m").unwrap().completed, 1);
    }

    #[test]
    fn test_session_reports_corrupt_load() {
        let mut backend = MemoryBackend::new();
        backend.seed(PROGRESS_KEY, "[1, 2");
        let session = ProgressSession::open(ProgressStore::new(backend));

        assert!(matches!(
            session.load_diagnostic(),
            Some(LoadDiagnostic::Corrupt(_))
        ));
        assert!(session.record().is_empty());
    }

    #[test]
    fn test_session_clear() {
        let mut session = ProgressSession::open(ProgressStore::new(MemoryBackend::new()));
        session.mark_completed("m");
        assert!(session.clear().is_saved());
        assert!(session.record().is_empty());

        let store = session.into_store();
        assert!(store.backend().peek(PROGRESS_KEY).is_none());
    }

    #[test]
    fn test_unreadable_load_never_overwrites_stored_progress() {
        let mut backend = MemoryBackend::new();
        backend.seed(
            PROGRESS_KEY,
            r#"{"m":{"completed":7,"scores":{},"code":{"w":"legacy"}}}"#,
        );
        backend.set_disabled(true);
        let mut session = ProgressSession::open(ProgressStore::new(backend));
        assert!(matches!(
            session.load_diagnostic(),
            Some(LoadDiagnostic::Unavailable(_))
        ));
        assert!(!session.is_persisting());

        // Backend recovers mid-session; the real record must survive
        session.store.backend_mut().set_disabled(false);
        session.mark_completed("m");
        assert!(session.record_score("m", "w", 50));
        let outcome = session.save_code("m", "w", Some("loop"), "new").unwrap();
        assert!(!outcome.is_saved());

        let stored = session.store().load();
        assert_eq!(stored.module("m").unwrap().completed, 7);
        assert!(stored.module("m").unwrap().code["w"].is_legacy());
    }

    #[test]
    fn test_clear_resumes_persistence() {
        let mut backend = MemoryBackend::new();
        backend.seed(PROGRESS_KEY, r#"{"m":{"completed":7,"scores":{},"code":{}}}"#);
        backend.set_disabled(true);
        let mut session = ProgressSession::open(ProgressStore::new(backend));
        assert!(!session.is_persisting());

        session.store.backend_mut().set_disabled(false);
        assert!(session.clear().is_saved());
        assert!(session.is_persisting());
        session.mark_completed("m");
        assert_eq!(session.store().load().module("m").unwrap().completed, 1);
    }

    #[test]
    fn test_session_failed_save_keeps_session_state() {
        let mut session = ProgressSession::open(ProgressStore::new(MemoryBackend::new()));
        session.mark_completed("m");

        let mut store = session.into_store();
        store.backend_mut().set_disabled(true);
        let mut session = ProgressSession::open(store);
        // Load failed, so the session starts empty but keeps working in memory
        assert!(session.load_diagnostic().is_some());
        assert_eq!(session.mark_completed("m"), 1);
        assert_eq!(session.record().module("m").unwrap().completed, 1);
    }
}
