//! Identity probes.

use redraft_core::draft::identity::IdentityProbe;
use redraft_types::draft::OwnerId;
use redraft_types::error::DraftStoreError;

/// An identity fixed at construction, e.g. from a CLI flag or a request
/// header already vetted by an upstream auth layer.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    owner: Option<OwnerId>,
}

impl StaticIdentity {
    pub fn new(owner: Option<OwnerId>) -> Self {
        Self { owner }
    }

    /// Parse a raw id; blank or missing input yields a guest identity.
    pub fn from_raw(raw: Option<&str>) -> Self {
        Self::new(raw.and_then(OwnerId::new))
    }

    pub fn guest() -> Self {
        Self::new(None)
    }
}

impl IdentityProbe for StaticIdentity {
    async fn current_owner_id(&self) -> Result<OwnerId, DraftStoreError> {
        self.owner.clone().ok_or(DraftStoreError::Unauthenticated)
    }
}
