//! Writing-assistant endpoint handlers.
//!
//! These routes do not touch stored drafts and need no owner header.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use redraft_core::assist::service::ResumeAssistant;
use redraft_types::assist::{
    EnhanceRequest, EnhanceResponse, ProfileImportRequest, SummaryRequest, SummaryResponse,
};
use redraft_types::document::ResumeDocument;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::ApiState;

fn assistant(state: &ApiState) -> Result<Arc<ResumeAssistant>, AppError> {
    state.assistant.clone().ok_or(AppError::AssistantUnavailable)
}

/// POST /api/v1/assist/summary - Three professional summary variations.
pub async fn generate_summary(
    State(state): State<ApiState>,
    Json(body): Json<SummaryRequest>,
) -> Result<Json<ApiResponse<SummaryResponse>>, AppError> {
    let timer = RequestTimer::start();
    let summaries = assistant(&state)?.generate_summaries(&body).await?;
    Ok(Json(timer.success(summaries)))
}

/// POST /api/v1/assist/enhance - Clarifying questions or stronger bullets.
pub async fn enhance_description(
    State(state): State<ApiState>,
    Json(body): Json<EnhanceRequest>,
) -> Result<Json<ApiResponse<EnhanceResponse>>, AppError> {
    let timer = RequestTimer::start();
    let enhanced = assistant(&state)?.enhance_description(&body).await?;
    Ok(Json(timer.success(enhanced)))
}

/// POST /api/v1/assist/import-profile - Parse pasted profile text into a
/// partial document.
pub async fn import_profile(
    State(state): State<ApiState>,
    Json(body): Json<ProfileImportRequest>,
) -> Result<Json<ApiResponse<ResumeDocument>>, AppError> {
    let timer = RequestTimer::start();
    let document = assistant(&state)?.parse_profile(&body.profile_text).await?;
    Ok(Json(timer.success(document)))
}
