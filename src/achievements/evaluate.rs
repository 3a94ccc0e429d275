//! Turn definitions plus a progress record into achievement values

use tracing::debug;

use super::calculator::{compute_condition_progress, Achievement, ConditionProgressMap};
use super::definitions::AchievementDefinition;
use crate::progress::ProgressRecord;

/// Evaluate every definition against `record`, preserving definition order
pub fn evaluate(definitions: &[AchievementDefinition], record: &ProgressRecord) -> Vec<Achievement> {
    definitions.iter().map(|def| evaluate_one(def, record)).collect()
}

fn evaluate_one(def: &AchievementDefinition, record: &ProgressRecord) -> Achievement {
    let progress: ConditionProgressMap = def
        .conditions
        .iter()
        .map(|cond| {
            let current = cond.metric.measure(record);
            (cond.key.clone(), compute_condition_progress(current, cond.target))
        })
        .collect();

    let unlocked = def
        .conditions
        .iter()
        .all(|cond| cond.metric.measure(record) >= cond.target);

    debug!("Achievement '{}' unlocked={}", def.id, unlocked);

    Achievement {
        id: def.id.clone(),
        name: def.name.clone(),
        description: def.description.clone(),
        points: def.points,
        unlocked,
        progress: if unlocked { None } else { Some(progress) },
    }
}
