//! Runtime selection of the durable store.
//!
//! `DurableDraftStore` uses RPITIT and cannot be a trait object, so the
//! binary picks a backend through this enum instead.

use std::path::Path;

use redraft_core::draft::store::DurableDraftStore;
use redraft_types::config::DraftConfig;
use redraft_types::document::ResumeDocument;
use redraft_types::draft::{DraftRecord, OwnerId, Step};
use redraft_types::error::DraftStoreError;

use crate::filesystem::database_url;
use crate::remote::http_store::HttpDraftStore;
use crate::sqlite::draft::SqliteDraftStore;
use crate::sqlite::pool::DatabasePool;

pub enum DraftBackend {
    Sqlite(SqliteDraftStore),
    Http(HttpDraftStore),
}

impl DraftBackend {
    /// The HTTP client when `remote_url` is configured, otherwise the local
    /// SQLite database in `data_dir`.
    pub async fn from_config(data_dir: &Path, config: &DraftConfig) -> Result<Self, sqlx::Error> {
        match config.remote_url.as_deref() {
            Some(url) => {
                tracing::debug!(%url, "using remote draft store");
                Ok(Self::Http(HttpDraftStore::new(url)))
            }
            None => {
                let pool = DatabasePool::open_in(data_dir, &database_url(data_dir, config)).await?;
                Ok(Self::Sqlite(SqliteDraftStore::new(pool)))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Http(_) => "http",
        }
    }
}

impl DurableDraftStore for DraftBackend {
    async fn load(&self, owner: &OwnerId) -> Result<Option<DraftRecord>, DraftStoreError> {
        match self {
            Self::Sqlite(store) => store.load(owner).await,
            Self::Http(store) => store.load(owner).await,
        }
    }

    async fn save(
        &self,
        owner: &OwnerId,
        document: ResumeDocument,
        step: Option<Step>,
    ) -> Result<DraftRecord, DraftStoreError> {
        match self {
            Self::Sqlite(store) => store.save(owner, document, step).await,
            Self::Http(store) => store.save(owner, document, step).await,
        }
    }

    async fn delete(&self, owner: &OwnerId) -> Result<(), DraftStoreError> {
        match self {
            Self::Sqlite(store) => store.delete(owner).await,
            Self::Http(store) => store.delete(owner).await,
        }
    }
}
