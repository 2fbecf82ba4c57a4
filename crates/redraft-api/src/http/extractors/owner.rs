//! Owner identity extractor.
//!
//! Reads the caller's owner id from the `x-owner-id` header, which an
//! upstream auth layer sets. A missing, blank, or non-UTF-8 header is
//! rejected with 401 before the handler runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use redraft_infra::remote::http_store::OWNER_HEADER;
use redraft_types::draft::OwnerId;

use crate::http::error::AppError;

/// The authenticated caller. Extracting this validates the owner header.
pub struct Owner(pub OwnerId);

impl<S: Send + Sync> FromRequestParts<S> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(OWNER_HEADER)
            .ok_or_else(|| AppError::Unauthorized(format!("Missing '{OWNER_HEADER}' header")))?
            .to_str()
            .map_err(|_| AppError::Unauthorized(format!("Invalid '{OWNER_HEADER}' header encoding")))?;

        OwnerId::new(raw)
            .map(Owner)
            .ok_or_else(|| AppError::Unauthorized(format!("Blank '{OWNER_HEADER}' header")))
    }
}
