//! Identity probe trait.

use std::future::Future;

use redraft_types::draft::OwnerId;
use redraft_types::error::DraftStoreError;

/// Answers "who is the current caller", if anyone.
///
/// Authentication itself happens elsewhere; this is the opaque predicate the
/// synchronizer consults once per session.
pub trait IdentityProbe: Send + Sync {
    /// The authenticated owner, `Unauthenticated` when there is none, or
    /// `StorageUnavailable` when the answer could not be obtained.
    fn current_owner_id(&self) -> impl Future<Output = Result<OwnerId, DraftStoreError>> + Send;
}
