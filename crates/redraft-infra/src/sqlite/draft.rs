//! SQLite implementation of `DurableDraftStore`.
//!
//! One row per owner in `resume_drafts`. A save reads the stored document,
//! merges the incoming sections into it, and writes it back inside a single
//! transaction on the writer pool.

use chrono::Utc;
use sqlx::Row;

use redraft_core::draft::store::DurableDraftStore;
use redraft_types::document::ResumeDocument;
use redraft_types::draft::{DraftRecord, OwnerId, Step};
use redraft_types::error::DraftStoreError;

use crate::sqlite::pool::DatabasePool;

pub struct SqliteDraftStore {
    pool: DatabasePool,
}

impl SqliteDraftStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create or merge the owner's draft.
    ///
    /// Returns the resulting record and whether the row was newly created.
    pub async fn upsert(
        &self,
        owner: &OwnerId,
        document: ResumeDocument,
        step: Option<Step>,
    ) -> Result<(DraftRecord, bool), DraftStoreError> {
        let mut tx = self.pool.writer.begin().await.map_err(unavailable)?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT document_json FROM resume_drafts WHERE owner_id = ?")
                .bind(owner.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(unavailable)?;

        let created = existing.is_none();
        let merged = match existing {
            Some(json) => decode_document(&json)?.merged(document),
            None => document,
        };
        let document_json = serde_json::to_string(&merged)
            .map_err(|e| DraftStoreError::StorageUnavailable(format!("encode draft: {e}")))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO resume_drafts (owner_id, document_json, last_completed_step, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(owner_id) DO UPDATE SET
                   document_json = excluded.document_json,
                   last_completed_step = excluded.last_completed_step,
                   updated_at = excluded.updated_at"#,
        )
        .bind(owner.as_str())
        .bind(&document_json)
        .bind(step.map(|s| s.as_str()))
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(unavailable)?;

        tx.commit().await.map_err(unavailable)?;

        tracing::debug!(
            owner_id = %owner,
            created,
            section_count = merged.sections().len(),
            "durable draft written"
        );
        Ok((DraftRecord::durable(merged, step), created))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unavailable(e: sqlx::Error) -> DraftStoreError {
    DraftStoreError::StorageUnavailable(e.to_string())
}

fn decode_document(json: &str) -> Result<ResumeDocument, DraftStoreError> {
    serde_json::from_str(json)
        .map_err(|e| DraftStoreError::StorageUnavailable(format!("corrupt draft document: {e}")))
}

fn decode_step(raw: Option<String>) -> Result<Option<Step>, DraftStoreError> {
    raw.map(|s| s.parse::<Step>())
        .transpose()
        .map_err(DraftStoreError::StorageUnavailable)
}

// ---------------------------------------------------------------------------
// DurableDraftStore implementation
// ---------------------------------------------------------------------------

impl DurableDraftStore for SqliteDraftStore {
    async fn load(&self, owner: &OwnerId) -> Result<Option<DraftRecord>, DraftStoreError> {
        let row = sqlx::query(
            "SELECT document_json, last_completed_step FROM resume_drafts WHERE owner_id = ?",
        )
        .bind(owner.as_str())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(unavailable)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let document_json: String = row.try_get("document_json").map_err(unavailable)?;
        let step: Option<String> = row.try_get("last_completed_step").map_err(unavailable)?;

        Ok(Some(DraftRecord::durable(
            decode_document(&document_json)?,
            decode_step(step)?,
        )))
    }

    async fn save(
        &self,
        owner: &OwnerId,
        document: ResumeDocument,
        step: Option<Step>,
    ) -> Result<DraftRecord, DraftStoreError> {
        self.upsert(owner, document, step)
            .await
            .map(|(record, _)| record)
    }

    async fn delete(&self, owner: &OwnerId) -> Result<(), DraftStoreError> {
        let result = sqlx::query("DELETE FROM resume_drafts WHERE owner_id = ?")
            .bind(owner.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(unavailable)?;

        tracing::debug!(owner_id = %owner, deleted = result.rows_affected(), "durable draft delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redraft_types::document::{BasicInfo, WorkEntry};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        // Leak the tempdir so it lives for the duration of the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).unwrap()
    }

    fn skills(items: &[&str]) -> ResumeDocument {
        ResumeDocument {
            skills: Some(items.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn summary(text: &str) -> ResumeDocument {
        ResumeDocument {
            summary: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let store = SqliteDraftStore::new(test_pool().await);
        assert!(store.load(&owner("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_then_load() {
        let store = SqliteDraftStore::new(test_pool().await);
        let document = ResumeDocument {
            basic_info: Some(BasicInfo {
                full_name: Some("Jane Doe".into()),
                ..Default::default()
            }),
            work_history: Some(vec![WorkEntry {
                title: "Engineer".into(),
                company: "Acme".into(),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let (record, created) = store
            .upsert(&owner("u1"), document.clone(), Some(Step::WorkHistory))
            .await
            .unwrap();
        assert!(created);
        assert_eq!(record.document, document);
        assert!(record.expires_at.is_none());

        let loaded = store.load(&owner("u1")).await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_save_merges_sections() {
        let store = SqliteDraftStore::new(test_pool().await);
        let id = owner("u1");

        store.save(&id, skills(&["a", "b"]), Some(Step::BasicInfo)).await.unwrap();
        let (record, created) = store
            .upsert(&id, summary("s"), Some(Step::Summary))
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(record.document, skills(&["a", "b"]).merged(summary("s")));
        assert_eq!(record.last_completed_step, Some(Step::Summary));
        assert_eq!(store.load(&id).await.unwrap().unwrap(), record);
    }

    #[tokio::test]
    async fn test_repeated_save_is_idempotent() {
        let store = SqliteDraftStore::new(test_pool().await);
        let id = owner("u1");

        let once = store.save(&id, skills(&["a", "b"]), None).await.unwrap();
        let twice = store.save(&id, skills(&["a", "b"]), None).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(store.load(&id).await.unwrap().unwrap(), once);
    }

    #[tokio::test]
    async fn test_incoming_null_step_wins() {
        let store = SqliteDraftStore::new(test_pool().await);
        let id = owner("u1");
        store.save(&id, skills(&["a"]), Some(Step::Education)).await.unwrap();

        let record = store.save(&id, summary("s"), None).await.unwrap();

        assert_eq!(record.last_completed_step, None);
        assert_eq!(store.load(&id).await.unwrap().unwrap().last_completed_step, None);
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let store = SqliteDraftStore::new(test_pool().await);
        store.save(&owner("a"), skills(&["rust"]), None).await.unwrap();
        store.save(&owner("b"), summary("other"), None).await.unwrap();

        let a = store.load(&owner("a")).await.unwrap().unwrap();
        assert_eq!(a.document, skills(&["rust"]));
        assert!(a.document.summary.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = SqliteDraftStore::new(test_pool().await);
        let id = owner("u1");
        store.save(&id, skills(&["a"]), None).await.unwrap();

        store.delete(&id).await.unwrap();
        store.delete(&id).await.unwrap();

        assert!(store.load(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_row_is_storage_unavailable() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO resume_drafts (owner_id, document_json, last_completed_step, created_at, updated_at) VALUES ('u1', 'not json', NULL, '', '')",
        )
        .execute(&pool.writer)
        .await
        .unwrap();
        let store = SqliteDraftStore::new(pool);

        let err = store.load(&owner("u1")).await.unwrap_err();
        assert!(matches!(err, DraftStoreError::StorageUnavailable(_)));
    }
}
