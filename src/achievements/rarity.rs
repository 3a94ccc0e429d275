//! Badge rarity tiers derived from achievement points

use std::collections::BTreeMap;

use serde::Serialize;

use super::calculator::Achievement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Tier for an achievement worth `points`
    pub fn for_points(points: u32) -> Self {
        match points {
            0..=4 => Self::Common,
            5..=9 => Self::Uncommon,
            10..=19 => Self::Rare,
            20..=49 => Self::Epic,
            _ => Self::Legendary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unlocked badge count per tier; every tier is present
pub fn rarity_stats(achievements: &[Achievement]) -> BTreeMap<Rarity, usize> {
    let mut stats: BTreeMap<Rarity, usize> = Rarity::ALL.iter().map(|&r| (r, 0)).collect();
    for achievement in achievements.iter().filter(|a| a.unlocked) {
        *stats.entry(Rarity::for_points(achievement.points)).or_default() += 1;
    }
    stats
}

/// Points earned from unlocked achievements
pub fn total_points(achievements: &[Achievement]) -> u32 {
    achievements
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.points)
        .sum()
}
