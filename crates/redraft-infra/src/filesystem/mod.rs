//! Data directory layout for redraft.

use std::path::{Path, PathBuf};

use redraft_types::config::DraftConfig;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `REDRAFT_DATA_DIR` environment variable
/// 2. `~/.redraft`
/// 3. `./.redraft`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("REDRAFT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".redraft");
    }

    PathBuf::from(".redraft")
}

/// SQLite URL for the configured database file.
pub fn database_url(data_dir: &Path, config: &DraftConfig) -> String {
    format!(
        "sqlite://{}?mode=rwc",
        data_dir.join(&config.database_file).display()
    )
}

pub fn cache_path(data_dir: &Path, config: &DraftConfig) -> PathBuf {
    data_dir.join(&config.cache_file)
}
