//! Configuration types for redraft.
//!
//! `DraftConfig` represents the top-level `config.toml` that controls the
//! autosave cadence, cache lifetime, file locations, and the assistant
//! provider.

use serde::{Deserialize, Serialize};

use crate::draft::CACHE_TTL_DAYS;

/// Top-level configuration.
///
/// Loaded from `~/.redraft/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Seconds between autosave ticks.
    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,

    /// Lifetime of the device-local cache record, in days.
    #[serde(default = "default_cache_ttl_days")]
    pub cache_ttl_days: i64,

    /// SQLite file name inside the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Cache file name inside the data directory.
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Base URL of a remote draft API. When set, the CLI uses it as the
    /// durable store instead of the local database.
    #[serde(default)]
    pub remote_url: Option<String>,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

fn default_autosave_interval_secs() -> u64 {
    30
}

fn default_cache_ttl_days() -> i64 {
    CACHE_TTL_DAYS
}

fn default_database_file() -> String {
    "redraft.db".to_string()
}

fn default_cache_file() -> String {
    "draft_cache.json".to_string()
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            autosave_interval_secs: default_autosave_interval_secs(),
            cache_ttl_days: default_cache_ttl_days(),
            database_file: default_database_file(),
            cache_file: default_cache_file(),
            remote_url: None,
            assistant: AssistantConfig::default(),
        }
    }
}

/// Settings for the OpenAI-compatible text-generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_base_url")]
    pub provider_base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider_base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}
