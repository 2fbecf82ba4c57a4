//! DraftSynchronizer -- decides which store is authoritative for a session.
//!
//! The synchronizer starts in `SyncMode::Unknown` and makes exactly one
//! transition during `initialize()`:
//!
//! - `Unknown -> Authenticated` when the identity probe yields an owner and
//!   the durable load succeeds (even with no record). Any cached guest draft
//!   is then migrated into the durable store and the cache is cleared, but
//!   only after the durable write succeeded.
//! - `Unknown -> Guest` when there is no caller, or when the probe or the
//!   durable load fails for any other reason. Editing is never blocked.
//!
//! Persistence failures never leave this type as errors on the save path:
//! a failed durable save is redirected to the cache and flagged for retry.

use redraft_types::document::ResumeDocument;
use redraft_types::draft::{DraftRecord, OwnerId, Step, SyncMode, WorkingState};
use redraft_types::error::DraftStoreError;

use super::cache::DraftCache;
use super::identity::IdentityProbe;
use super::store::DurableDraftStore;

/// Where a save ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the durable store.
    Durable,
    /// The durable write failed; the document went to the cache instead.
    CacheFallback,
    /// Guest session; written to the cache only.
    Cache,
}

impl SaveOutcome {
    pub fn is_durable(&self) -> bool {
        matches!(self, SaveOutcome::Durable)
    }
}

pub struct DraftSynchronizer<S, C, I> {
    store: S,
    cache: C,
    identity: I,
    mode: SyncMode,
    owner: Option<OwnerId>,
    working: WorkingState,
    needs_retry: bool,
}

impl<S, C, I> DraftSynchronizer<S, C, I>
where
    S: DurableDraftStore,
    C: DraftCache,
    I: IdentityProbe,
{
    pub fn new(store: S, cache: C, identity: I) -> Self {
        Self {
            store,
            cache,
            identity,
            mode: SyncMode::Unknown,
            owner: None,
            working: WorkingState::default(),
            needs_retry: false,
        }
    }

    /// Probe identity once and load the authoritative draft.
    ///
    /// Calling this again after the first transition is a no-op that returns
    /// the current working state.
    pub async fn initialize(&mut self) -> WorkingState {
        if self.mode != SyncMode::Unknown {
            tracing::debug!(mode = %self.mode, "synchronizer already initialized");
            return self.working.clone();
        }

        let owner = match self.identity.current_owner_id().await {
            Ok(owner) => owner,
            Err(DraftStoreError::Unauthenticated) => {
                tracing::info!("no authenticated caller, editing as guest");
                self.enter_guest().await;
                return self.working.clone();
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity probe failed, editing as guest");
                self.enter_guest().await;
                return self.working.clone();
            }
        };

        match self.store.load(&owner).await {
            Ok(record) => {
                self.working = record
                    .map(DraftRecord::into_working_state)
                    .unwrap_or_default();
                self.mode = SyncMode::Authenticated;
                tracing::info!(
                    owner_id = %owner,
                    step = ?self.working.last_completed_step,
                    "durable draft loaded"
                );
                self.owner = Some(owner);
                self.migrate_cached_draft().await;
            }
            Err(DraftStoreError::Unauthenticated) => {
                tracing::info!(owner_id = %owner, "durable store rejected caller, editing as guest");
                self.enter_guest().await;
            }
            Err(e) => {
                tracing::warn!(owner_id = %owner, error = %e, "durable load failed, editing as guest");
                self.enter_guest().await;
            }
        }

        self.working.clone()
    }

    async fn enter_guest(&mut self) {
        self.working = self
            .cache
            .load()
            .await
            .map(DraftRecord::into_working_state)
            .unwrap_or_default();
        self.mode = SyncMode::Guest;
    }

    /// Move a cached guest draft into the durable store.
    ///
    /// Runs only after the durable load succeeded. The cache is cleared only
    /// once the durable write succeeded; otherwise the cached content is
    /// folded into the working state and the next durable save carries it.
    async fn migrate_cached_draft(&mut self) {
        let Some(owner) = self.owner.clone() else {
            return;
        };
        let Some(cached) = self.cache.load().await else {
            return;
        };

        let section_count = cached.document.sections().len();
        match self
            .store
            .save(&owner, cached.document.clone(), cached.last_completed_step)
            .await
        {
            Ok(record) => {
                self.cache.clear().await;
                self.working = record.into_working_state();
                tracing::info!(owner_id = %owner, section_count, "migrated guest draft to durable store");
            }
            Err(e) => {
                self.working.document.merge(cached.document);
                self.working.last_completed_step = cached.last_completed_step;
                self.needs_retry = true;
                tracing::warn!(
                    owner_id = %owner,
                    error = %e,
                    "guest draft migration failed, cache kept for retry"
                );
            }
        }
    }

    /// Current in-memory state. Never touches storage.
    pub fn working_state(&self) -> &WorkingState {
        &self.working
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    /// Whether the last durable save failed and the cache holds newer content.
    pub fn needs_retry(&self) -> bool {
        self.needs_retry
    }

    /// Persist the full document to whichever store is authoritative.
    ///
    /// The working state is updated before any I/O, so edits survive even if
    /// both stores fail.
    pub async fn save(&mut self, document: ResumeDocument, step: Option<Step>) -> SaveOutcome {
        self.working = WorkingState {
            document: document.clone(),
            last_completed_step: step,
        };

        let owner = match (&self.mode, &self.owner) {
            (SyncMode::Authenticated, Some(owner)) => owner.clone(),
            _ => {
                self.cache.save(&document, step).await;
                tracing::debug!(step = ?step, "draft saved to cache");
                return SaveOutcome::Cache;
            }
        };

        match self.store.save(&owner, document.clone(), step).await {
            Ok(record) => {
                if self.needs_retry {
                    // Durable now holds everything the fallback cache had.
                    self.cache.clear().await;
                    self.needs_retry = false;
                    tracing::info!(owner_id = %owner, "durable save recovered after earlier failure");
                }
                self.working = record.into_working_state();
                tracing::debug!(owner_id = %owner, step = ?step, "draft saved to durable store");
                SaveOutcome::Durable
            }
            Err(e) => {
                self.cache.save(&document, step).await;
                self.needs_retry = true;
                tracing::warn!(
                    owner_id = %owner,
                    error = %e,
                    "durable save failed, draft kept in cache"
                );
                SaveOutcome::CacheFallback
            }
        }
    }

    /// Merge an externally produced partial document and save immediately.
    pub async fn import_external(&mut self, partial: ResumeDocument) -> SaveOutcome {
        let document = self.working.document.clone().merged(partial);
        let step = self.working.last_completed_step;
        self.save(document, step).await
    }

    /// Delete the draft everywhere and reset the working state.
    ///
    /// Unlike `save`, a durable failure here is returned: the caller asked
    /// for deletion and must know it did not happen.
    pub async fn discard(&mut self) -> Result<(), DraftStoreError> {
        if let (SyncMode::Authenticated, Some(owner)) = (&self.mode, &self.owner) {
            self.store.delete(owner).await?;
            tracing::info!(owner_id = %owner, "durable draft deleted");
        }
        self.cache.clear().await;
        self.working = WorkingState::default();
        self.needs_retry = false;
        Ok(())
    }
}
