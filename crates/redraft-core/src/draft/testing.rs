//! In-memory port implementations shared by the core unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use redraft_types::document::ResumeDocument;
use redraft_types::draft::{CACHE_TTL_DAYS, DraftRecord, OwnerId, Step};
use redraft_types::error::DraftStoreError;

use super::cache::DraftCache;
use super::identity::IdentityProbe;
use super::store::DurableDraftStore;

#[derive(Clone, Default)]
pub struct MockStore {
    records: Arc<Mutex<HashMap<OwnerId, DraftRecord>>>,
    save_calls: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
    load_error: Arc<Mutex<Option<DraftStoreError>>>,
}

impl MockStore {
    pub fn seed(&self, owner: &OwnerId, record: DraftRecord) {
        self.records.lock().unwrap().insert(owner.clone(), record);
    }

    pub fn record(&self, owner: &OwnerId) -> Option<DraftRecord> {
        self.records.lock().unwrap().get(owner).cloned()
    }

    /// Number of save attempts, successful or not.
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, error: DraftStoreError) {
        *self.load_error.lock().unwrap() = Some(error);
    }
}

impl DurableDraftStore for MockStore {
    async fn load(&self, owner: &OwnerId) -> Result<Option<DraftRecord>, DraftStoreError> {
        if let Some(err) = self.load_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.record(owner))
    }

    async fn save(
        &self,
        owner: &OwnerId,
        document: ResumeDocument,
        step: Option<Step>,
    ) -> Result<DraftRecord, DraftStoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DraftStoreError::StorageUnavailable("mock store offline".into()));
        }
        let mut records = self.records.lock().unwrap();
        let merged = match records.get(owner) {
            Some(existing) => existing.document.clone().merged(document),
            None => document,
        };
        let record = DraftRecord::durable(merged, step);
        records.insert(owner.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, owner: &OwnerId) -> Result<(), DraftStoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DraftStoreError::StorageUnavailable("mock store offline".into()));
        }
        self.records.lock().unwrap().remove(owner);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockCache {
    record: Arc<Mutex<Option<DraftRecord>>>,
}

impl MockCache {
    /// Raw contents, without the expiry check.
    pub fn snapshot(&self) -> Option<DraftRecord> {
        self.record.lock().unwrap().clone()
    }
}

impl DraftCache for MockCache {
    async fn save(&self, document: &ResumeDocument, step: Option<Step>) {
        let record = DraftRecord::cached(
            document.clone(),
            step,
            Utc::now(),
            Duration::days(CACHE_TTL_DAYS),
        );
        *self.record.lock().unwrap() = Some(record);
    }

    async fn load(&self) -> Option<DraftRecord> {
        let mut slot = self.record.lock().unwrap();
        if slot.as_ref().is_some_and(|r| r.is_expired_at(Utc::now())) {
            *slot = None;
        }
        slot.clone()
    }

    async fn clear(&self) {
        *self.record.lock().unwrap() = None;
    }
}

pub struct MockIdentity(Result<OwnerId, DraftStoreError>);

impl MockIdentity {
    pub fn of(owner: OwnerId) -> Self {
        Self(Ok(owner))
    }

    pub fn guest() -> Self {
        Self(Err(DraftStoreError::Unauthenticated))
    }

    pub fn failing() -> Self {
        Self(Err(DraftStoreError::StorageUnavailable("auth service down".into())))
    }
}

impl IdentityProbe for MockIdentity {
    async fn current_owner_id(&self) -> Result<OwnerId, DraftStoreError> {
        self.0.clone()
    }
}
