//! Data model for persisted progress
//!
//! The JSON shape is the wire format shared with every earlier version of the
//! payload, so field names and the untagged [`CodeEntry`] encoding must not
//! change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Saved solution code for one workshop
///
/// Older payloads stored a single string per workshop. Multi-approach
/// workshops store one string per approach id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeEntry {
    /// Pre-approach format: one blob for the whole workshop
    LegacyBlob(String),
    /// `approach_id -> code`
    ApproachMap(BTreeMap<String, String>),
}

impl CodeEntry {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::LegacyBlob(_))
    }

    /// Upgrade a legacy blob to an approach map, keying the blob under
    /// `approach_id`.
    ///
    /// Returns `true` if the entry changed. An approach map is left as is.
    pub fn upgrade_to_approach(&mut self, approach_id: &str) -> bool {
        let Self::LegacyBlob(blob) = self else {
            return false;
        };
        let blob = std::mem::take(blob);
        let mut approaches = BTreeMap::new();
        approaches.insert(approach_id.to_string(), blob);
        *self = Self::ApproachMap(approaches);
        true
    }

    /// Number of saved solutions held by this entry
    pub fn solution_count(&self) -> usize {
        match self {
            Self::LegacyBlob(_) => 1,
            Self::ApproachMap(approaches) => approaches.len(),
        }
    }
}

/// Progress within one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProgress {
    /// Number of completed workshops
    #[serde(default)]
    pub completed: u32,

    /// Best score per workshop
    #[serde(default)]
    pub scores: BTreeMap<String, i64>,

    /// Saved code per workshop
    #[serde(default)]
    pub code: BTreeMap<String, CodeEntry>,
}

/// Root progress record, keyed by module id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    pub modules: BTreeMap<String, ModuleProgress>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleProgress> {
        self.modules.get(module_id)
    }

    /// Module entry, created empty if missing
    pub fn module_mut(&mut self, module_id: &str) -> &mut ModuleProgress {
        self.modules.entry(module_id.to_string()).or_default()
    }

    /// Mutable access to an existing code entry only
    pub(crate) fn code_entry_mut(
        &mut self,
        module_id: &str,
        workshop_id: &str,
    ) -> Option<&mut CodeEntry> {
        self.modules.get_mut(module_id)?.code.get_mut(workshop_id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_legacy_and_current_code_shapes() {
        let json = r#"{
            "python_basics": {
                "completed": 2,
                "scores": {"basics_01": 80},
                "code": {
                    "basics_01": "def even_squares(nums): ...",
                    "basics_02": {"loop": "for x in xs: ...", "comprehension": "[x for x in xs]"}
                }
            }
        }"#;

        let record = ProgressRecord::from_json(json).unwrap();
        let module = record.module("python_basics").unwrap();
        assert_eq!(module.completed, 2);
        assert_eq!(module.scores["basics_01"], 80);
        assert_eq!(
            module.code["basics_01"],
            CodeEntry::LegacyBlob("def even_squares(nums): ...".to_string())
        );
        match &module.code["basics_02"] {
            CodeEntry::ApproachMap(map) => assert_eq!(map.len(), 2),
            other => panic!("expected approach map, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let record = ProgressRecord::from_json(r#"{"m": {}}"#).unwrap();
        assert_eq!(record.module("m"), Some(&ModuleProgress::default()));
    }

    #[test]
    fn test_serializes_to_wire_shape() {
        let mut record = ProgressRecord::new();
        record
            .module_mut("m")
            .code
            .insert("w".to_string(), CodeEntry::LegacyBlob("x = 1".to_string()));

        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["m"]["code"]["w"], "x = 1");
        assert_eq!(value["m"]["completed"], 0);
    }

    #[test]
    fn test_upgrade_only_moves_forward() {
        let mut entry = CodeEntry::LegacyBlob("blob".to_string());
        assert!(entry.upgrade_to_approach("loop"));
        assert!(!entry.is_legacy());

        // Second upgrade under another key must not re-key or drop anything
        assert!(!entry.upgrade_to_approach("comprehension"));
        let CodeEntry::ApproachMap(map) = &entry else {
            panic!("expected approach map");
        };
        assert_eq!(map.len(), 1);
        assert_eq!(map["loop"], "blob");
    }

    #[test]
    fn test_non_string_code_entry_is_rejected() {
        assert!(ProgressRecord::from_json(r#"{"m": {"code": {"w": 5}}}"#).is_err());
    }
}
