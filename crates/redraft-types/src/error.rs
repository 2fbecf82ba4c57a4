use thiserror::Error;

/// Errors from draft storage backends (used by the store traits in redraft-core).
///
/// The two variants must stay distinguishable: `Unauthenticated` moves a
/// session into guest mode, `StorageUnavailable` triggers a local fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftStoreError {
    #[error("no authenticated caller")]
    Unauthenticated,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// Errors from the text-generation assistant paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistError {
    /// The generator failed or returned content that could not be parsed.
    #[error("enhancement failed: {0}")]
    EnhancementFailed(String),

    /// The caller's input did not pass validation before any generation.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}
