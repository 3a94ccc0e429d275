//! Init command implementation

use anyhow::{bail, Result};
use std::path::Path;

use learnpath::Config;

/// Default configuration content for learnpath init
pub const DEFAULT_CONFIG: &str = r#"# Learnpath Configuration
# =======================

# ============================================================================
# STORAGE - Where progress is kept
# ============================================================================
#
# Available options:
#   backend         - "file" (JSON file per key), "sqlite" or "memory"
#   data_dir        - Data directory (default: ~/.learnpath/data)
#   key             - Key the progress record is stored under
#   max_value_bytes - Reject saves larger than this (unset = no limit)

[storage]
backend = "file"
key = "workshop_progress"

# ============================================================================
# ACHIEVEMENTS - Unlock conditions measured against your progress
# ============================================================================
#
# Each achievement unlocks once every condition reaches its target.
#
# Metric kinds:
#   total_completed                     - completed workshops, all modules
#   module_completed (module = "...")   - completed workshops in one module
#   total_score                         - sum of best scores
#   scored_workshops                    - workshops with any score
#   perfect_scores                      - workshops scored 100
#   saved_solutions                     - saved solutions (per approach)
#
# Example:
#
# [[achievement]]
# id = "first_steps"
# name = "First Steps"
# description = "Complete your first workshop"
# points = 5
# conditions = [{ key = "completed", metric = { kind = "total_completed" }, target = 1 }]
"#;

/// Write the default config file
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_command(Some(&path), false).unwrap();
        assert!(init_command(Some(&path), false).is_err());
        init_command(Some(&path), true).unwrap();
    }
}
