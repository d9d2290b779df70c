use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::module_dto::CreateModulePayload;
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_modules(State(state): State<AppState>) -> crate::error::Result<Response> {
    let modules = state.module_service.list_modules().await?;
    Ok(Json(modules).into_response())
}

#[axum::debug_handler]
pub async fn get_module(
    State(state): State<AppState>,
    Path(module_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let module = state.module_service.get_module(module_id).await?;
    Ok(Json(module).into_response())
}

#[axum::debug_handler]
pub async fn create_module(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateModulePayload>,
) -> crate::error::Result<Response> {
    req.validate()?;
    state.user_service.require_user(&claims).await?;
    let module = state.module_service.create_module(req).await?;
    Ok(Json(module).into_response())
}
