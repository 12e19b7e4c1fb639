//! Route definitions for the Calorie Tracker API
//!
//! This module organizes all API routes and applies middleware.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use calorie_tracker_shared::parse_time_of_day;
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod calories;
mod data;
mod fasting;
mod goals;
mod health;
mod stats;


pub use calories::calorie_routes;
pub use data::data_routes;
pub use fasting::fasting_routes;
pub use goals::goal_routes;
pub use stats::stats_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Calorie Tracker API v1" }))
        .nest("/calories", calorie_routes())
        .nest("/goals", goal_routes())
        .nest("/stats", stats_routes())
        .nest("/fasting", fasting_routes())
        .nest("/data", data_routes())
}

/// Today's date, unless the request pins one
pub(crate) fn resolve_today(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(|| Local::now().date_naive())
}

/// Current time of day to the minute, unless the request pins one
pub(crate) fn resolve_now(requested: Option<&str>) -> Result<NaiveTime, ApiError> {
    let pinned = requested
        .map(parse_time_of_day)
        .transpose()
        .map_err(|e| ApiError::field("time", e.to_string()))?
        .flatten();

    Ok(pinned.unwrap_or_else(|| {
        let now = Local::now().time();
        NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
    }))
}
