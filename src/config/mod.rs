//! Configuration loading and management

mod io;
mod storage;

pub use storage::{BackendKind, StorageSettings};

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementDefinition;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where and how progress is stored
    #[serde(default)]
    pub storage: StorageSettings,

    /// Achievement definitions (`[[achievement]]` tables)
    #[serde(default, rename = "achievement")]
    pub achievements: Vec<AchievementDefinition>,
}
