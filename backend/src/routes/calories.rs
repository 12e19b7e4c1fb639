//! Daily calorie API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::DailyCaloriesRecord;
use crate::services::CalorieService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use calorie_tracker_shared::{
    format_time_of_day, DailyCaloriesListResponse, DailyCaloriesResponse, DateRangeQuery,
    DayViewResponse, UpsertDailyCaloriesRequest,
};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;

/// Create daily calorie routes
pub fn calorie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries))
        .route("/:date", get(get_day).put(upsert_day).delete(delete_day))
}

pub(super) fn entry_response(record: &DailyCaloriesRecord) -> DailyCaloriesResponse {
    DailyCaloriesResponse {
        id: record.id.to_string(),
        date: record.date,
        calories_consumed: record.calories_consumed,
        target_calories: record.target_calories,
        fasting_hours: record.fasting_hours.and_then(|h| h.to_f64()),
        fast_start_time: record.fast_start_time.map(format_time_of_day),
        fast_end_time: record.fast_end_time.map(format_time_of_day),
        notes: record.notes.clone(),
        updated_at: record.updated_at,
    }
}

/// GET /api/v1/calories?start&end - Entries in range, oldest first
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<DailyCaloriesListResponse>, ApiError> {
    let records =
        CalorieService::get_range(state.db(), auth.user_id, query.start, query.end).await?;

    Ok(Json(DailyCaloriesListResponse {
        start: query.start,
        end: query.end,
        entries: records.iter().map(entry_response).collect(),
    }))
}

/// GET /api/v1/calories/:date - One day with its status
///
/// Returns 200 with a null entry when nothing is logged.
async fn get_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayViewResponse>, ApiError> {
    let view = CalorieService::get_day(
        state.db(),
        auth.user_id,
        date,
        state.default_daily_target(),
        state.policy(),
    )
    .await?;

    Ok(Json(DayViewResponse {
        date: view.date,
        entry: view.entry.as_ref().map(entry_response),
        status: view.status,
        band: view.band,
    }))
}

/// PUT /api/v1/calories/:date - Create or replace the day's entry
async fn upsert_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
    Json(req): Json<UpsertDailyCaloriesRequest>,
) -> Result<Json<DailyCaloriesResponse>, ApiError> {
    let record = CalorieService::upsert_day(
        state.db(),
        auth.user_id,
        date,
        req,
        state.default_daily_target(),
    )
    .await?;

    Ok(Json(entry_response(&record)))
}

/// DELETE /api/v1/calories/:date
async fn delete_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<StatusCode, ApiError> {
    CalorieService::delete_day(state.db(), auth.user_id, date).await?;
    Ok(StatusCode::NO_CONTENT)
}
