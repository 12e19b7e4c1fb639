//! Fasting API routes

use super::{resolve_now, resolve_today};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::FastingService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use calorie_tracker_shared::{
    format_fasting_duration, format_time_of_day, CreateFastingPresetRequest,
    FastingPresetResponse, FastingPresetsListResponse, FastingStatusQuery, FastingStatusResponse,
    FastingWindowQuery, FastingWindowResponse, UpdateFastingPresetRequest,
};

/// Create fasting routes
pub fn fasting_routes() -> Router<AppState> {
    Router::new()
        .route("/presets", get(list_presets).post(create_preset))
        .route(
            "/presets/:id",
            get(get_preset).put(update_preset).delete(delete_preset),
        )
        .route("/status", get(fasting_status))
        .route("/window", get(fasting_window))
}

/// GET /api/v1/fasting/presets - Built-in presets then the user's own
async fn list_presets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FastingPresetsListResponse>, ApiError> {
    let presets = FastingService::list_presets(state.db(), auth.user_id).await?;

    Ok(Json(FastingPresetsListResponse {
        presets: presets.iter().map(FastingPresetResponse::from).collect(),
    }))
}

/// GET /api/v1/fasting/presets/:id
async fn get_preset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FastingPresetResponse>, ApiError> {
    let preset = FastingService::get_preset(state.db(), auth.user_id, &id).await?;
    Ok(Json(FastingPresetResponse::from(&preset)))
}

/// POST /api/v1/fasting/presets
async fn create_preset(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFastingPresetRequest>,
) -> Result<(StatusCode, Json<FastingPresetResponse>), ApiError> {
    let preset = FastingService::create_preset(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(FastingPresetResponse::from(&preset))))
}

/// PUT /api/v1/fasting/presets/:id
async fn update_preset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateFastingPresetRequest>,
) -> Result<Json<FastingPresetResponse>, ApiError> {
    let preset = FastingService::update_preset(state.db(), auth.user_id, &id, req).await?;
    Ok(Json(FastingPresetResponse::from(&preset)))
}

/// DELETE /api/v1/fasting/presets/:id
async fn delete_preset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    FastingService::delete_preset(state.db(), auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/fasting/status?date&time - Live status of the day's fast
async fn fasting_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FastingStatusQuery>,
) -> Result<Json<FastingStatusResponse>, ApiError> {
    let date = resolve_today(query.date);
    let now = resolve_now(query.time.as_deref())?;

    let view = FastingService::status(state.db(), auth.user_id, date, now).await?;

    Ok(Json(FastingStatusResponse {
        date,
        now: format_time_of_day(now),
        fast_start_time: view.window.map(|w| format_time_of_day(w.start)),
        fast_end_time: view.window.map(|w| format_time_of_day(w.end)),
        shape: view.shape(),
        status: view.status,
    }))
}

/// GET /api/v1/fasting/window?start|end&hours - Complete a window from one bound
async fn fasting_window(
    _auth: AuthUser,
    Query(query): Query<FastingWindowQuery>,
) -> Result<Json<FastingWindowResponse>, ApiError> {
    let window =
        FastingService::window(query.start.as_deref(), query.end.as_deref(), query.hours)?;

    Ok(Json(FastingWindowResponse {
        start: format_time_of_day(window.start),
        end: format_time_of_day(window.end),
        hours: query.hours,
        shape: window.shape(),
        length_minutes: window.length_minutes(),
        display_duration: format_fasting_duration(query.hours),
    }))
}
