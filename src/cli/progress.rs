//! Progress commands: show, score, complete, clear

use anyhow::{bail, Result};

use learnpath::progress::{CodeEntry, ModuleProgress};
use learnpath::Config;

use super::open_session;

/// Print stored progress
pub fn show_command(config: &Config, module: Option<&str>) -> Result<()> {
    let session = open_session(config)?;
    let record = session.record();

    let modules: Vec<(&String, &ModuleProgress)> = match module {
        Some(id) => match record.modules.get_key_value(id) {
            Some(entry) => vec![entry],
            None => {
                println!("No progress for module '{}'.", id);
                return Ok(());
            }
        },
        None => record.modules.iter().collect(),
    };

    if modules.is_empty() {
        println!("No progress recorded yet.");
        return Ok(());
    }

    for (id, progress) in modules {
        println!("{} ({} completed)", id, progress.completed);

        for (workshop, score) in &progress.scores {
            println!("  {:<24} score {:>3}", workshop, score);
        }

        for (workshop, entry) in &progress.code {
            match entry {
                CodeEntry::LegacyBlob(_) => println!("  {:<24} saved code", workshop),
                CodeEntry::ApproachMap(approaches) => {
                    let names: Vec<&str> = approaches.keys().map(String::as_str).collect();
                    println!("  {:<24} saved code [{}]", workshop, names.join(", "));
                }
            }
        }
        println!();
    }

    Ok(())
}

/// Record a workshop score
pub fn score_command(config: &Config, module: &str, workshop: &str, score: i64) -> Result<()> {
    let mut session = open_session(config)?;

    if session.record_score(module, workshop, score) {
        let best = session
            .record()
            .module(module)
            .and_then(|m| m.scores.get(workshop))
            .copied()
            .unwrap_or_default();
        println!("New best for {}/{}: {}", module, workshop, best);
    } else {
        println!("Score {} does not beat the stored best for {}/{}.", score, module, workshop);
    }

    Ok(())
}

/// Count a completed workshop
pub fn complete_command(config: &Config, module: &str) -> Result<()> {
    let mut session = open_session(config)?;
    let count = session.mark_completed(module);
    println!("{}: {} workshop(s) completed", module, count);
    Ok(())
}

/// Delete all stored progress
pub fn clear_command(config: &Config) -> Result<()> {
    let mut session = open_session(config)?;
    if !session.clear().is_saved() {
        bail!("Failed to clear stored progress");
    }
    println!("Progress cleared.");
    Ok(())
}
