//! Durable draft store trait.
//!
//! One record per authenticated owner. Saves merge at section granularity:
//! a section absent from the incoming document is never deleted from storage.

use std::future::Future;

use redraft_types::document::ResumeDocument;
use redraft_types::draft::{DraftRecord, OwnerId, Step};
use redraft_types::error::DraftStoreError;

/// Persistence interface for per-owner drafts.
///
/// Uses RPITIT (return position `impl Trait` in traits) consistent with
/// all async traits in this project.
pub trait DurableDraftStore: Send + Sync {
    /// Load the owner's draft.
    ///
    /// Returns `None` if the owner never saved one. Fails with
    /// `Unauthenticated` when the backend cannot establish the caller.
    fn load(
        &self,
        owner: &OwnerId,
    ) -> impl Future<Output = Result<Option<DraftRecord>, DraftStoreError>> + Send;

    /// Create or merge the owner's draft and return the resulting record.
    ///
    /// On creation the record holds exactly `document`. On update every
    /// section present in `document` replaces the stored one, the others are
    /// retained, and `last_completed_step` becomes `step`.
    fn save(
        &self,
        owner: &OwnerId,
        document: ResumeDocument,
        step: Option<Step>,
    ) -> impl Future<Output = Result<DraftRecord, DraftStoreError>> + Send;

    /// Delete the owner's draft.
    ///
    /// No-op if the draft does not exist.
    fn delete(&self, owner: &OwnerId)
    -> impl Future<Output = Result<(), DraftStoreError>> + Send;
}
