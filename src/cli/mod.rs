//! CLI command implementations

pub mod achievements;
pub mod code;
pub mod init;
pub mod progress;

use anyhow::Result;

use learnpath::storage::StorageBackend;
use learnpath::{Config, ProgressSession};

/// Open a session over the configured store, reporting a degraded load
pub(crate) fn open_session(config: &Config) -> Result<ProgressSession<Box<dyn StorageBackend>>> {
    let session = ProgressSession::open(config.open_store()?);
    if let Some(diagnostic) = session.load_diagnostic() {
        eprintln!("Warning: {} (starting with empty progress)", diagnostic);
    }
    if !session.is_persisting() {
        eprintln!("Warning: changes will not be saved; run `learnpath clear` to reset");
    }
    Ok(session)
}
