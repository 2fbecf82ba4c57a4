//! Device-local draft cache trait.
//!
//! Exactly one logical record per device, always carrying an expiry.
//! Implementations must never fail outward: medium errors are logged and the
//! cache degrades to "no draft found".

use std::future::Future;

use redraft_types::document::ResumeDocument;
use redraft_types::draft::{DraftRecord, Step};

/// Ephemeral single-record draft cache.
pub trait DraftCache: Send + Sync {
    /// Replace the record unconditionally, expiring one TTL from now.
    fn save(
        &self,
        document: &ResumeDocument,
        step: Option<Step>,
    ) -> impl Future<Output = ()> + Send;

    /// Return the record if present and unexpired.
    ///
    /// An expired record is deleted as part of the read.
    fn load(&self) -> impl Future<Output = Option<DraftRecord>> + Send;

    /// Delete the record. Safe to call when absent.
    fn clear(&self) -> impl Future<Output = ()> + Send;
}
