//! Draft endpoint handlers for the REST API.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use redraft_core::draft::store::DurableDraftStore;
use redraft_types::draft::{DeleteDraftResponse, DraftResponse, SaveDraftRequest};

use crate::http::error::AppError;
use crate::http::extractors::owner::Owner;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::ApiState;

const SELF_LINK: &str = "/api/v1/draft";

/// GET /api/v1/draft - The caller's draft, or `null` when none exists.
pub async fn get_draft(
    State(state): State<ApiState>,
    Owner(owner): Owner,
) -> Result<Json<ApiResponse<DraftResponse>>, AppError> {
    let timer = RequestTimer::start();

    let draft = state.drafts.load(&owner).await?;

    Ok(Json(
        timer
            .success(DraftResponse { draft })
            .with_link("self", SELF_LINK),
    ))
}

/// POST /api/v1/draft - Merge the submitted sections into the caller's draft.
///
/// 201 when the draft was created, 200 when an existing one was updated.
pub async fn save_draft(
    State(state): State<ApiState>,
    Owner(owner): Owner,
    Json(body): Json<SaveDraftRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DraftResponse>>), AppError> {
    let timer = RequestTimer::start();

    let (record, created) = state
        .drafts
        .upsert(&owner, body.document, body.last_completed_step)
        .await?;

    tracing::info!(
        owner_id = %owner,
        created,
        step = ?record.last_completed_step,
        "draft saved via API"
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let resp = timer
        .success(DraftResponse {
            draft: Some(record),
        })
        .with_link("self", SELF_LINK);

    Ok((status, Json(resp)))
}

/// DELETE /api/v1/draft - Remove the caller's draft. Idempotent.
pub async fn delete_draft(
    State(state): State<ApiState>,
    Owner(owner): Owner,
) -> Result<Json<ApiResponse<DeleteDraftResponse>>, AppError> {
    let timer = RequestTimer::start();

    state.drafts.delete(&owner).await?;
    tracing::info!(owner_id = %owner, "draft deleted via API");

    Ok(Json(timer.success(DeleteDraftResponse { success: true })))
}
