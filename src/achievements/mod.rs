//! Achievements: progress toward caller-defined unlock conditions
//!
//! This module never decides which achievements exist. It measures
//! [`AchievementDefinition`]s against a [`ProgressRecord`], and ranks and
//! summarizes the results for display.
//!
//! [`ProgressRecord`]: crate::progress::ProgressRecord

mod calculator;
mod definitions;
mod evaluate;
mod rarity;

pub use calculator::{
    closest_to_unlock, compute_condition_progress, rank_in_progress, summarize, Achievement,
    AchievementSummary, ConditionProgress, ConditionProgressMap,
};
pub use definitions::{AchievementDefinition, ConditionDefinition, Metric};
pub use evaluate::evaluate;
pub use rarity::{rarity_stats, total_points, Rarity};
