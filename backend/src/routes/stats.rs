//! Statistics API routes

use super::goals::goal_response;
use super::resolve_today;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::StatsService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use calorie_tracker_shared::{AsOfQuery, DateRangeQuery, RangeSummaryResponse, WeekStatsResponse};

/// Create statistics routes
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/week", get(week_stats))
        .route("/summary", get(range_summary))
}

/// GET /api/v1/stats/week?date&today - Weekly status and per-day breakdown
///
/// `date` selects the week and defaults to today.
async fn week_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<WeekStatsResponse>, ApiError> {
    let today = resolve_today(query.today);
    let week_of = query.date.unwrap_or(today);

    let stats = StatsService::week_stats(
        state.db(),
        auth.user_id,
        week_of,
        today,
        state.default_daily_target(),
        state.policy(),
    )
    .await?;

    Ok(Json(WeekStatsResponse {
        week_start: stats.week_start,
        week_end: stats.week_end,
        today,
        goal: stats.goal.as_ref().map(goal_response),
        status: stats.status,
        days: stats.days,
    }))
}

/// GET /api/v1/stats/summary?start&end - Accuracy statistics over a range
async fn range_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<RangeSummaryResponse>, ApiError> {
    let summary = StatsService::range_summary(
        state.db(),
        auth.user_id,
        query.start,
        query.end,
        state.policy(),
    )
    .await?;

    Ok(Json(RangeSummaryResponse {
        start: query.start,
        end: query.end,
        summary,
    }))
}
