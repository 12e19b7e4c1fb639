//! API request and response types

use crate::calories::{DailyStatus, DayBreakdown, ProgressBand, RangeSummary, WeeklyStatus};
use crate::fasting::{format_fasting_duration, FastingStatus, WindowShape};
use crate::presets::FastingPreset;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Reference dates for week views
///
/// `date` picks the week; `today` overrides the server's current date.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AsOfQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

// ============================================================================
// Daily Calorie Types
// ============================================================================

/// Create or replace the entry for one day
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertDailyCaloriesRequest {
    #[validate(range(min = 0, max = 10000))]
    pub calories_consumed: i32,
    /// Falls back to the day's default target when omitted
    #[serde(default)]
    #[validate(range(min = 0, max = 10000))]
    pub target_calories: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 168.0))]
    pub fasting_hours: Option<f64>,
    /// `HH:MM`
    #[serde(default)]
    pub fast_start_time: Option<String>,
    /// `HH:MM`
    #[serde(default)]
    pub fast_end_time: Option<String>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Stored daily entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCaloriesResponse {
    pub id: String,
    pub date: NaiveDate,
    pub calories_consumed: i32,
    pub target_calories: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fasting_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// One day with its derived status; `entry` is null when nothing is logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayViewResponse {
    pub date: NaiveDate,
    pub entry: Option<DailyCaloriesResponse>,
    pub status: DailyStatus,
    pub band: ProgressBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCaloriesListResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entries: Vec<DailyCaloriesResponse>,
}

// ============================================================================
// Weekly Goal Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertWeeklyGoalRequest {
    #[validate(range(min = 1000, max = 50000))]
    pub total_target_calories: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyGoalResponse {
    pub id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_target_calories: i32,
    /// Even split of the weekly budget across seven days
    pub daily_average: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyGoalsListResponse {
    pub goals: Vec<WeeklyGoalResponse>,
}

// ============================================================================
// Statistics Types
// ============================================================================

/// Weekly overview: totals, pacing and a per-day breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekStatsResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub today: NaiveDate,
    pub goal: Option<WeeklyGoalResponse>,
    pub status: WeeklyStatus,
    pub days: Vec<DayBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSummaryResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(flatten)]
    pub summary: RangeSummary,
}

// ============================================================================
// Fasting Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastingPresetResponse {
    pub id: String,
    pub name: String,
    pub hours: f64,
    pub description: String,
    pub color: String,
    pub bg_color: String,
    pub text_color: String,
    pub is_custom: bool,
    /// e.g. `16h` or `1d 12h`
    pub display_duration: String,
}

impl From<&FastingPreset> for FastingPresetResponse {
    fn from(preset: &FastingPreset) -> Self {
        Self {
            id: preset.id.clone(),
            name: preset.name.clone(),
            hours: preset.hours,
            description: preset.description.clone(),
            color: preset.color.name().to_string(),
            bg_color: preset.color.bg_class(),
            text_color: preset.color.text_class().to_string(),
            is_custom: preset.is_custom,
            display_duration: format_fasting_duration(preset.hours),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastingPresetsListResponse {
    pub presets: Vec<FastingPresetResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFastingPresetRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, max = 168.0))]
    pub hours: f64,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub description: Option<String>,
    /// Unknown colour names are stored as gray
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFastingPresetRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, max = 168.0))]
    pub hours: Option<f64>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Which day's fast to inspect and at what time of day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FastingStatusQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// `HH:MM`; defaults to the server's local time
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastingStatusResponse {
    pub date: NaiveDate,
    pub now: String,
    pub fast_start_time: Option<String>,
    pub fast_end_time: Option<String>,
    pub shape: Option<WindowShape>,
    #[serde(flatten)]
    pub status: FastingStatus,
}

/// Complementary window bound; exactly one of `start` and `end` is given
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastingWindowQuery {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastingWindowResponse {
    pub start: String,
    pub end: String,
    pub hours: f64,
    pub shape: WindowShape,
    pub length_minutes: i64,
    pub display_duration: String,
}

// ============================================================================
// Data Management Types
// ============================================================================

/// Which tables a bulk deletion touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionScope {
    #[default]
    All,
    Calories,
    Goals,
    Presets,
}

impl DeletionScope {
    pub fn includes_calories(&self) -> bool {
        matches!(self, DeletionScope::All | DeletionScope::Calories)
    }

    pub fn includes_goals(&self) -> bool {
        matches!(self, DeletionScope::All | DeletionScope::Goals)
    }

    pub fn includes_presets(&self) -> bool {
        matches!(self, DeletionScope::All | DeletionScope::Presets)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeletionQuery {
    #[serde(default)]
    pub scope: DeletionScope,
}

/// Rows removed per table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionSummaryResponse {
    pub scope: DeletionScope,
    pub daily_calories: u64,
    pub weekly_goals: u64,
    pub fasting_presets: u64,
}
