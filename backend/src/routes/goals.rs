//! Weekly goal API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::WeeklyGoalRecord;
use crate::services::GoalService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use calorie_tracker_shared::{
    week_end, UpsertWeeklyGoalRequest, WeeklyGoalResponse, WeeklyGoalsListResponse,
};
use chrono::NaiveDate;

/// Create weekly goal routes
pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/weekly", get(list_goals))
        .route(
            "/weekly/:date",
            get(get_goal).put(upsert_goal).delete(delete_goal),
        )
}

pub(super) fn goal_response(record: &WeeklyGoalRecord) -> WeeklyGoalResponse {
    WeeklyGoalResponse {
        id: record.id.to_string(),
        week_start: record.week_start,
        week_end: week_end(record.week_start),
        total_target_calories: record.total_target_calories,
        daily_average: GoalService::daily_average(record.total_target_calories),
        updated_at: record.updated_at,
    }
}

/// GET /api/v1/goals/weekly - All goals, newest week first
async fn list_goals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<WeeklyGoalsListResponse>, ApiError> {
    let goals = GoalService::list(state.db(), auth.user_id).await?;

    Ok(Json(WeeklyGoalsListResponse {
        goals: goals.iter().map(goal_response).collect(),
    }))
}

/// GET /api/v1/goals/weekly/:date - Goal for the week containing `date`
async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WeeklyGoalResponse>, ApiError> {
    let goal = GoalService::get_for_week(state.db(), auth.user_id, date).await?;
    Ok(Json(goal_response(&goal)))
}

/// PUT /api/v1/goals/weekly/:date - Set the budget for the week containing `date`
async fn upsert_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
    Json(req): Json<UpsertWeeklyGoalRequest>,
) -> Result<Json<WeeklyGoalResponse>, ApiError> {
    let goal = GoalService::upsert(state.db(), auth.user_id, date, req).await?;
    Ok(Json(goal_response(&goal)))
}

/// DELETE /api/v1/goals/weekly/:date
async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<StatusCode, ApiError> {
    GoalService::delete(state.db(), auth.user_id, date).await?;
    Ok(StatusCode::NO_CONTENT)
}
