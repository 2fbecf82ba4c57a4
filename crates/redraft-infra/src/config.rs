//! Configuration loader for redraft.
//!
//! Reads `config.toml` from the data directory (`~/.redraft/` in production)
//! and deserializes it into [`DraftConfig`]. Falls back to defaults when the
//! file is missing or malformed, then clamps values to their floors.

use std::path::Path;
use std::time::Duration;

use redraft_types::config::DraftConfig;

/// Shortest allowed autosave period.
const MIN_AUTOSAVE_INTERVAL_SECS: u64 = 1;

/// Shortest allowed cache lifetime.
const MIN_CACHE_TTL_DAYS: i64 = 1;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or unparseable file: a warning, then defaults.
/// - Otherwise the parsed config with floors applied.
pub async fn load_draft_config(data_dir: &Path) -> DraftConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return DraftConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return DraftConfig::default();
        }
    };

    match toml::from_str::<DraftConfig>(&content) {
        Ok(config) => apply_floors(config),
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            DraftConfig::default()
        }
    }
}

fn apply_floors(mut config: DraftConfig) -> DraftConfig {
    config.autosave_interval_secs = config.autosave_interval_secs.max(MIN_AUTOSAVE_INTERVAL_SECS);
    config.cache_ttl_days = config.cache_ttl_days.max(MIN_CACHE_TTL_DAYS);
    config
}

pub fn autosave_interval(config: &DraftConfig) -> Duration {
    Duration::from_secs(config.autosave_interval_secs.max(MIN_AUTOSAVE_INTERVAL_SECS))
}

pub fn cache_ttl(config: &DraftConfig) -> chrono::Duration {
    chrono::Duration::days(config.cache_ttl_days.max(MIN_CACHE_TTL_DAYS))
}
