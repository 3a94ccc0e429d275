//! Saved-code lookup with lazy format migration
//!
//! Legacy payloads hold one code blob per workshop. Once a workshop gains
//! several approaches, the first approach-keyed read of such a blob re-keys it
//! under the requested approach and persists the upgraded record. Nothing is
//! migrated eagerly, and nothing else in the record is touched.

use tracing::info;

use super::model::{CodeEntry, ProgressRecord};
use super::store::ProgressStore;
use super::ProgressError;
use crate::storage::StorageBackend;

/// Look up saved code for a workshop, migrating a legacy entry if an
/// approach is requested.
///
/// - No module / no entry for the workshop: `None`.
/// - `approach_id` given, legacy entry: the entry becomes
///   `{approach_id: blob}`, the record is saved, and the blob is returned.
/// - `approach_id` given, approach map: the code for that approach, if any.
/// - No `approach_id`: the blob of a legacy entry; an approach map has no
///   single answer, so `None`.
pub fn get_saved_code<B: StorageBackend>(
    store: &mut ProgressStore<B>,
    record: &mut ProgressRecord,
    module_id: &str,
    workshop_id: &str,
    approach_id: Option<&str>,
) -> Option<String> {
    let (code, migrated) = lookup_code(record, module_id, workshop_id, approach_id);
    if migrated {
        // A failed save is already logged; the in-memory upgrade stands
        let _ = store.save(record);
    }
    code
}

/// In-memory half of [`get_saved_code`]: the code to show and whether the
/// record was upgraded and needs saving
pub(crate) fn lookup_code(
    record: &mut ProgressRecord,
    module_id: &str,
    workshop_id: &str,
    approach_id: Option<&str>,
) -> (Option<String>, bool) {
    let Some(entry) = record.code_entry_mut(module_id, workshop_id) else {
        return (None, false);
    };

    let Some(approach_id) = approach_id else {
        let code = match entry {
            CodeEntry::LegacyBlob(blob) => Some(blob.clone()),
            CodeEntry::ApproachMap(_) => None,
        };
        return (code, false);
    };

    let migrated = entry.upgrade_to_approach(approach_id);
    if migrated {
        info!(
            "Migrated legacy code for {}/{} under approach '{}'",
            module_id, workshop_id, approach_id
        );
    }
    (approach_code(entry, approach_id), migrated)
}

fn approach_code(entry: &CodeEntry, approach_id: &str) -> Option<String> {
    match entry {
        CodeEntry::ApproachMap(approaches) => approaches.get(approach_id).cloned(),
        CodeEntry::LegacyBlob(_) => None,
    }
}

/// Store code for a workshop in the current format.
///
/// With an approach, the entry is (or becomes) an approach map and the
/// approach's code is replaced. Without one, a single blob is written, which
/// is only allowed while the workshop has no approach map. The record is not
/// persisted here.
pub fn save_code(
    record: &mut ProgressRecord,
    module_id: &str,
    workshop_id: &str,
    approach_id: Option<&str>,
    code: &str,
) -> Result<(), ProgressError> {
    let module = record.module_mut(module_id);

    match approach_id {
        Some(approach_id) => {
            let entry = module
                .code
                .entry(workshop_id.to_string())
                .or_insert_with(|| CodeEntry::ApproachMap(Default::default()));
            entry.upgrade_to_approach(approach_id);
            if let CodeEntry::ApproachMap(approaches) = entry {
                approaches.insert(approach_id.to_string(), code.to_string());
            }
        }
        None => {
            if let Some(CodeEntry::ApproachMap(_)) = module.code.get(workshop_id) {
                return Err(ProgressError::ShapeConflict {
                    module_id: module_id.to_string(),
                    workshop_id: workshop_id.to_string(),
                });
            }
            module
                .code
                .insert(workshop_id.to_string(), CodeEntry::LegacyBlob(code.to_string()));
        }
    }

    Ok(())
}
