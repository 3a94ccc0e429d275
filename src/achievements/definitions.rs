//! Achievement definition descriptors
//!
//! No achievements are built in. Definitions come from the caller, usually the
//! `[[achievement]]` tables of the config file:
//!
//! ```toml
//! [[achievement]]
//! id = "perfectionist"
//! name = "Perfectionist"
//! description = "Score 100 on three workshops"
//! points = 20
//! conditions = [{ key = "perfect", metric = { kind = "perfect_scores" }, target = 3 }]
//! ```

use serde::{Deserialize, Serialize};

use crate::progress::ProgressRecord;

/// Counter read from the progress record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metric {
    /// Completed workshops across all modules
    TotalCompleted,
    /// Completed workshops in one module
    ModuleCompleted { module: String },
    /// Sum of best scores
    TotalScore,
    /// Workshops with any score
    ScoredWorkshops,
    /// Workshops with a full score
    PerfectScores,
    /// Saved solutions, each approach counted separately
    SavedSolutions,
}

impl Metric {
    /// Current value of this metric in `record`
    pub fn measure(&self, record: &ProgressRecord) -> f64 {
        match self {
            Self::TotalCompleted => record.total_completed() as f64,
            Self::ModuleCompleted { module } => record
                .module(module)
                .map(|m| f64::from(m.completed))
                .unwrap_or(0.0),
            Self::TotalScore => record.total_score() as f64,
            Self::ScoredWorkshops => record.scored_workshops() as f64,
            Self::PerfectScores => record.perfect_scores() as f64,
            Self::SavedSolutions => record.saved_solutions() as f64,
        }
    }
}

/// One named condition of an achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub key: String,
    pub metric: Metric,
    pub target: f64,
}

/// A caller-supplied achievement: unlocked when every condition is met
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub conditions: Vec<ConditionDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_measures_record() {
        let mut record = ProgressRecord::new();
        record.mark_completed("python_basics");
        record.mark_completed("python_basics");
        record.mark_completed("oop");
        record.record_score("oop", "oop_01", 100);

        let module = Metric::ModuleCompleted {
            module: "python_basics".to_string(),
        };
        assert_eq!(module.measure(&record), 2.0);
        assert_eq!(Metric::TotalCompleted.measure(&record), 3.0);
        assert_eq!(Metric::PerfectScores.measure(&record), 1.0);
        assert_eq!(
            Metric::ModuleCompleted { module: "missing".to_string() }.measure(&record),
            0.0
        );
    }

    #[test]
    fn test_definition_from_toml() {
        let toml_str = r#"
            id = "explorer"
            name = "Explorer"
            conditions = [
                { key = "basics", metric = { kind = "module_completed", module = "python_basics" }, target = 5 },
                { key = "saved", metric = { kind = "saved_solutions" }, target = 2 },
            ]
        "#;

        let def: AchievementDefinition = toml::from_str(toml_str).unwrap();
        assert_eq!(def.points, 0);
        assert_eq!(def.conditions.len(), 2);
        assert_eq!(def.conditions[1].metric, Metric::SavedSolutions);
        assert_eq!(def.conditions[0].target, 5.0);
    }
}
