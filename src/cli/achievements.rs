//! Achievements command

use anyhow::Result;

use learnpath::achievements::{
    closest_to_unlock, evaluate, rarity_stats, summarize, total_points, Rarity,
};
use learnpath::Config;

use super::open_session;

const BAR_WIDTH: usize = 20;

/// Show unlocked achievements and the ones closest to unlocking
pub fn achievements_command(config: &Config, top: usize) -> Result<()> {
    if config.achievements.is_empty() {
        println!("No achievements defined. Add [[achievement]] tables to your config.");
        return Ok(());
    }

    let session = open_session(config)?;
    let achievements = evaluate(&config.achievements, session.record());
    let summary = summarize(&achievements);

    println!(
        "Achievements: {}/{} unlocked ({}%), {} points\n",
        summary.unlocked_count,
        summary.total_count,
        summary.percentage,
        total_points(&achievements)
    );

    for achievement in achievements.iter().filter(|a| a.unlocked) {
        println!(
            "  [x] {} ({}) - {}",
            achievement.name,
            Rarity::for_points(achievement.points),
            achievement.description
        );
    }

    let closest = closest_to_unlock(&achievements, top);
    if !closest.is_empty() {
        println!("\nClosest to unlocking:");
        for achievement in closest {
            println!("  [ ] {} - {}", achievement.name, achievement.description);
            if let Some(progress) = &achievement.progress {
                for (key, condition) in progress.iter() {
                    println!(
                        "      {:<16} {} {:>3}% ({}/{})",
                        key,
                        progress_bar(condition.percentage),
                        condition.percentage,
                        condition.current,
                        condition.target
                    );
                }
            }
        }
    }

    let stats = rarity_stats(&achievements);
    let tiers: Vec<String> = stats
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(rarity, count)| format!("{} {}", count, rarity))
        .collect();
    if !tiers.is_empty() {
        println!("\nBadges: {}", tiers.join(", "));
    }

    Ok(())
}

fn progress_bar(percentage: u8) -> String {
    let filled = usize::from(percentage) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
