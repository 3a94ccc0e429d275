//! Saved code commands

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use learnpath::progress::SaveOutcome;
use learnpath::Config;

use super::open_session;

/// Print saved code for a workshop (migrating legacy entries on approach reads)
pub fn get_command(
    config: &Config,
    module: &str,
    workshop: &str,
    approach: Option<&str>,
) -> Result<()> {
    let mut session = open_session(config)?;

    match session.saved_code(module, workshop, approach) {
        Some(code) => print!("{}", code),
        None => match approach {
            Some(approach) => eprintln!(
                "No saved code for {}/{} (approach '{}').",
                module, workshop, approach
            ),
            None => eprintln!("No saved code for {}/{}.", module, workshop),
        },
    }

    Ok(())
}

/// Save code for a workshop, from `--code` or `--file`
pub fn save_command(
    config: &Config,
    module: &str,
    workshop: &str,
    approach: Option<&str>,
    code: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let code = match (code, file) {
        (Some(code), _) => code,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read code file: {}", path.display()))?,
        (None, None) => bail!("Either --code or --file is required"),
    };

    let mut session = open_session(config)?;
    match session.save_code(module, workshop, approach, &code)? {
        SaveOutcome::Saved => println!("Saved code for {}/{}.", module, workshop),
        SaveOutcome::Failed(e) => bail!("Code was not persisted: {}", e),
    }

    Ok(())
}
