//! File-backed implementation of `DraftCache`.
//!
//! The single cache record lives as JSON in one file. Writes go to a sibling
//! temp file first and are renamed into place. No operation returns an error:
//! I/O failures are logged and a broken file reads as "no draft".

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use redraft_core::draft::cache::DraftCache;
use redraft_types::document::ResumeDocument;
use redraft_types::draft::{CACHE_TTL_DAYS, DraftRecord, Step};

pub struct FileDraftCache {
    path: PathBuf,
    ttl: Duration,
}

impl FileDraftCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_ttl(path, Duration::days(CACHE_TTL_DAYS))
    }

    pub fn with_ttl(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// [`DraftCache::save`] with an explicit clock.
    pub async fn save_at(&self, document: &ResumeDocument, step: Option<Step>, now: DateTime<Utc>) {
        let record = DraftRecord::cached(document.clone(), step, now, self.ttl);
        if let Err(e) = self.write(&record).await {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write draft cache");
        }
    }

    /// [`DraftCache::load`] with an explicit clock.
    pub async fn load_at(&self, now: DateTime<Utc>) -> Option<DraftRecord> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read draft cache");
                return None;
            }
        };

        let record = match serde_json::from_str::<DraftRecord>(&content) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt draft cache");
                self.remove().await;
                return None;
            }
        };

        // A cache record without expiry was not written by this cache.
        if record.expires_at.is_none() || record.is_expired_at(now) {
            tracing::debug!(path = %self.path.display(), "draft cache expired");
            self.remove().await;
            return None;
        }
        Some(record)
    }

    async fn write(&self, record: &DraftRecord) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec(record)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await
    }

    async fn remove(&self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove draft cache");
            }
        }
    }
}

impl DraftCache for FileDraftCache {
    async fn save(&self, document: &ResumeDocument, step: Option<Step>) {
        self.save_at(document, step, Utc::now()).await;
    }

    async fn load(&self) -> Option<DraftRecord> {
        self.load_at(Utc::now()).await
    }

    async fn clear(&self) {
        self.remove().await;
    }
}
