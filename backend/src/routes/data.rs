//! Data management routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::DataService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::delete,
    Json, Router,
};
use calorie_tracker_shared::{DeletionQuery, DeletionSummaryResponse};

/// Create data management routes
pub fn data_routes() -> Router<AppState> {
    Router::new().route("/", delete(delete_data))
}

/// DELETE /api/v1/data?scope=all|calories|goals|presets
async fn delete_data(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DeletionQuery>,
) -> Result<Json<DeletionSummaryResponse>, ApiError> {
    let summary = DataService::delete_user_data(state.db(), auth.user_id, query.scope).await?;
    Ok(Json(summary))
}
