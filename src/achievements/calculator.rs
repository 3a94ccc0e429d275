//! Achievement progress calculation
//!
//! Pure functions over achievement values: bounded per-condition progress,
//! ranking by closeness to unlock, and overall summary.

use serde::{Serialize, Serializer};

/// Progress toward one condition of an achievement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionProgress {
    pub current: f64,
    pub target: f64,
    /// Always within `0..=100`
    pub percentage: u8,
}

/// Condition key -> progress, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionProgressMap {
    entries: Vec<(String, ConditionProgress)>,
}

impl ConditionProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced key keeps its original position
    pub fn insert(&mut self, key: impl Into<String>, progress: ConditionProgress) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = progress,
            None => self.entries.push((key, progress)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConditionProgress> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    /// The first inserted condition
    pub fn first(&self) -> Option<(&str, &ConditionProgress)> {
        self.entries.first().map(|(k, p)| (k.as_str(), p))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionProgress)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ConditionProgressMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, p)| (k, p)))
    }
}

impl FromIterator<(String, ConditionProgress)> for ConditionProgressMap {
    fn from_iter<I: IntoIterator<Item = (String, ConditionProgress)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, progress) in iter {
            map.insert(key, progress);
        }
        map
    }
}

/// An achievement as shown to the learner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points: u32,
    pub unlocked: bool,
    /// Present only while locked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ConditionProgressMap>,
}

impl Achievement {
    /// Percentage of the first condition, 0 when there is none
    pub fn first_condition_percentage(&self) -> u8 {
        self.progress
            .as_ref()
            .and_then(|p| p.first())
            .map(|(_, c)| c.percentage)
            .unwrap_or(0)
    }
}

/// Overall unlock summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementSummary {
    pub unlocked_count: usize,
    pub total_count: usize,
    pub percentage: u8,
}

/// Bounded progress of `current` toward `target`.
///
/// A non-positive target counts as already met (100%).
pub fn compute_condition_progress(current: f64, target: f64) -> ConditionProgress {
    let percentage = if target <= 0.0 {
        100
    } else {
        bounded_percentage(100.0 * current / target)
    };

    ConditionProgress {
        current,
        target,
        percentage,
    }
}

/// Locked achievements that carry progress, closest to unlocking first.
///
/// Ordered by the first condition's percentage, descending. Ties keep their
/// input order.
pub fn rank_in_progress(achievements: &[Achievement]) -> Vec<&Achievement> {
    let mut ranked: Vec<&Achievement> = achievements
        .iter()
        .filter(|a| !a.unlocked && a.progress.is_some())
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| {
        b.first_condition_percentage()
            .cmp(&a.first_condition_percentage())
    });
    ranked
}

/// The `limit` achievements closest to unlocking
pub fn closest_to_unlock(achievements: &[Achievement], limit: usize) -> Vec<&Achievement> {
    let mut ranked = rank_in_progress(achievements);
    ranked.truncate(limit);
    ranked
}

/// Count unlocked achievements
pub fn summarize(achievements: &[Achievement]) -> AchievementSummary {
    let total_count = achievements.len();
    let unlocked_count = achievements.iter().filter(|a| a.unlocked).count();
    // Integer round-half-up, exact for any counts
    let percentage = if total_count == 0 {
        0
    } else {
        ((200 * unlocked_count + total_count) / (2 * total_count)).min(100) as u8
    };

    AchievementSummary {
        unlocked_count,
        total_count,
        percentage,
    }
}

fn bounded_percentage(pct: f64) -> u8 {
    let pct = pct.round();
    if pct.is_nan() {
        0
    } else {
        pct.clamp(0.0, 100.0) as u8
    }
}
