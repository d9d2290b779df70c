use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::progress_dto::{AddTimeSpentRequest, MarkSectionCompleteResponse};
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_user_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user = state.user_service.require_user(&claims).await?;
    let progress = state.progress_service.list_for_user(user.id).await?;
    Ok(Json(progress).into_response())
}

#[axum::debug_handler]
pub async fn mark_section_complete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((module_id, section_id)): Path<(Uuid, Uuid)>,
) -> crate::error::Result<Response> {
    let user = state.user_service.require_user(&claims).await?;
    let (summary, sections_completed) = state
        .progress_service
        .mark_section_complete(user.id, module_id, section_id)
        .await?;

    Ok(Json(MarkSectionCompleteResponse {
        message: "Section marked as complete".to_string(),
        progress_percentage: summary.percentage,
        sections_completed,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn add_time_spent(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(module_id): Path<Uuid>,
    Json(req): Json<AddTimeSpentRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user = state.user_service.require_user(&claims).await?;
    let progress = state
        .progress_service
        .add_time_spent(user.id, module_id, req.minutes)
        .await?;
    Ok(Json(progress).into_response())
}
