use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user = state.user_service.require_user(&claims).await?;
    let stats = state.progress_service.dashboard_stats(user.id).await?;
    Ok(Json(stats).into_response())
}
