//! Data models consumed by the calculation core
//!
//! These are the storage-agnostic shapes of the persisted records. The
//! backend maps its database rows into them before running calculations.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One logged day of intake for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub calories_consumed: i32,
    /// Target in effect for this specific day
    pub target_calories: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fasting_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyRecord {
    /// Create a record with just the calorie figures set
    pub fn new(date: NaiveDate, calories_consumed: i32, target_calories: i32) -> Self {
        Self {
            date,
            calories_consumed,
            target_calories,
            fasting_hours: None,
            fast_start_time: None,
            fast_end_time: None,
            notes: None,
        }
    }

    /// Attach a fasting window to the record
    pub fn with_fast(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.fast_start_time = Some(start);
        self.fast_end_time = Some(end);
        self
    }
}

/// Weekly calorie budget, keyed by the Monday that opens the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGoal {
    pub week_start: NaiveDate,
    pub total_target_calories: i32,
}

impl WeeklyGoal {
    /// Create a goal anchored to the canonical week start of `date`
    pub fn for_week_of(date: NaiveDate, total_target_calories: i32) -> Self {
        Self {
            week_start: crate::week::week_start(date),
            total_target_calories,
        }
    }
}
