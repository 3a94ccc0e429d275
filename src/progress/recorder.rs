//! Gameplay event recording and aggregate counters
//!
//! These only mutate the in-memory record; persisting is up to the caller
//! (see [`super::ProgressSession`]).

use super::model::ProgressRecord;

/// Highest score a workshop grader awards
pub const MAX_SCORE: i64 = 100;

impl ProgressRecord {
    /// Record a workshop score, keeping the best one seen.
    ///
    /// Scores are clamped to `0..=MAX_SCORE`. Returns `true` if the stored
    /// score changed.
    pub fn record_score(&mut self, module_id: &str, workshop_id: &str, score: i64) -> bool {
        let score = score.clamp(0, MAX_SCORE);
        let scores = &mut self.module_mut(module_id).scores;

        match scores.get(workshop_id) {
            Some(&best) if best >= score => false,
            _ => {
                scores.insert(workshop_id.to_string(), score);
                true
            }
        }
    }

    /// Count one more completed workshop in a module, returning the new count
    pub fn mark_completed(&mut self, module_id: &str) -> u32 {
        let module = self.module_mut(module_id);
        module.completed = module.completed.saturating_add(1);
        module.completed
    }

    /// Completed workshops across all modules
    pub fn total_completed(&self) -> u64 {
        self.modules.values().map(|m| u64::from(m.completed)).sum()
    }

    /// Sum of best scores across all workshops
    pub fn total_score(&self) -> i64 {
        self.modules
            .values()
            .flat_map(|m| m.scores.values())
            .sum()
    }

    /// Workshops with any recorded score
    pub fn scored_workshops(&self) -> u64 {
        self.modules.values().map(|m| m.scores.len() as u64).sum()
    }

    /// Workshops scored at [`MAX_SCORE`]
    pub fn perfect_scores(&self) -> u64 {
        self.modules
            .values()
            .flat_map(|m| m.scores.values())
            .filter(|&&s| s >= MAX_SCORE)
            .count() as u64
    }

    /// Saved solutions, counting each approach separately
    pub fn saved_solutions(&self) -> u64 {
        self.modules
            .values()
            .flat_map(|m| m.code.values())
            .map(|entry| entry.solution_count() as u64)
            .sum()
    }
}
