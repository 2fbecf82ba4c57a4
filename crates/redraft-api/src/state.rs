//! Application state shared by the CLI and the REST API.
//!
//! `AppState` resolves the data directory, loads `config.toml`, and builds the
//! optional assistant. CLI commands open a builder session through it; the
//! server builds an `ApiState` pinned to the local SQLite store.

use std::path::PathBuf;
use std::sync::Arc;

use redraft_core::assist::service::ResumeAssistant;
use redraft_core::builder::session::ResumeBuilder;
use redraft_core::draft::sync::DraftSynchronizer;
use redraft_infra::backend::DraftBackend;
use redraft_infra::cache::file::FileDraftCache;
use redraft_infra::config::{autosave_interval, cache_ttl, load_draft_config};
use redraft_infra::filesystem::{cache_path, database_url, resolve_data_dir};
use redraft_infra::identity::StaticIdentity;
use redraft_infra::llm::create_provider;
use redraft_infra::sqlite::draft::SqliteDraftStore;
use redraft_infra::sqlite::pool::DatabasePool;
use redraft_types::config::DraftConfig;

/// Builder session pinned to the infra implementations the CLI uses.
pub type CliBuilder = ResumeBuilder<DraftBackend, FileDraftCache, StaticIdentity>;

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: Arc<DraftConfig>,
    /// `None` when no API key is configured.
    pub assistant: Option<Arc<ResumeAssistant>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_draft_config(&data_dir).await;
        let assistant = match create_provider(&config.assistant) {
            Ok(provider) => Some(Arc::new(ResumeAssistant::new(
                provider,
                &config.assistant.model,
            ))),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    env = %config.assistant.api_key_env,
                    "assistant disabled"
                );
                None
            }
        };

        Ok(Self {
            data_dir,
            config: Arc::new(config),
            assistant,
        })
    }

    /// Open a builder session for `owner` (guest when `None`), autosaving on
    /// the configured interval until it is dropped.
    pub async fn open_builder(&self, owner: Option<&str>) -> anyhow::Result<CliBuilder> {
        let store = DraftBackend::from_config(&self.data_dir, &self.config).await?;
        tracing::debug!(backend = store.kind(), "draft store ready");

        let cache = FileDraftCache::with_ttl(
            cache_path(&self.data_dir, &self.config),
            cache_ttl(&self.config),
        );
        let sync = DraftSynchronizer::new(store, cache, StaticIdentity::from_raw(owner));
        let mut builder = ResumeBuilder::open(sync).await;
        builder.start_autosave(autosave_interval(&self.config));
        Ok(builder)
    }

    /// State for the HTTP server, backed by the local database.
    pub async fn api_state(&self) -> anyhow::Result<ApiState> {
        let url = database_url(&self.data_dir, &self.config);
        let pool = DatabasePool::open_in(&self.data_dir, &url).await?;
        Ok(ApiState {
            drafts: Arc::new(SqliteDraftStore::new(pool)),
            assistant: self.assistant.clone(),
        })
    }
}

/// State handed to axum handlers.
#[derive(Clone)]
pub struct ApiState {
    pub drafts: Arc<SqliteDraftStore>,
    pub assistant: Option<Arc<ResumeAssistant>>,
}
