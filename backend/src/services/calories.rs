//! Calorie service - daily entries and their derived status

use crate::error::ApiError;
use crate::repositories::{
    DailyCaloriesRecord, DailyCaloriesRepository, UpsertDailyCalories, WeeklyGoalRepository,
};
use calorie_tracker_shared::{
    daily_status, default_daily_target, fast_end_time, fast_start_time, parse_time_of_day,
    progress_band, week_start, CaloriePolicy, DailyStatus, ProgressBand, UpsertDailyCaloriesRequest,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Longest span a single range query may cover
pub const MAX_RANGE_DAYS: i64 = 366;

/// A day with its derived status
#[derive(Debug, Clone)]
pub struct DayView {
    pub date: NaiveDate,
    pub entry: Option<DailyCaloriesRecord>,
    pub status: DailyStatus,
    pub band: ProgressBand,
}

/// Calorie service
pub struct CalorieService;

impl CalorieService {
    /// Entries between `start` and `end` inclusive, oldest first
    pub async fn get_range(
        db: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCaloriesRecord>, ApiError> {
        Self::check_range(start, end)?;

        DailyCaloriesRepository::get_range(db, user_id, start, end)
            .await
            .map_err(ApiError::Internal)
    }

    /// One day's entry and status
    ///
    /// A day with nothing logged is a normal state: `entry` is `None` and the
    /// status shows zero consumed against the default target.
    pub async fn get_day(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        fallback_target: i32,
        policy: &CaloriePolicy,
    ) -> Result<DayView, ApiError> {
        let entry = DailyCaloriesRepository::get_by_date(db, user_id, date)
            .await
            .map_err(ApiError::Internal)?;
        let goal = WeeklyGoalRepository::get_by_week_start(db, user_id, week_start(date))
            .await
            .map_err(ApiError::Internal)?
            .map(|g| g.to_weekly_goal());

        let record = entry.as_ref().map(|e| e.to_daily_record());
        let target = default_daily_target(record.as_ref(), goal.as_ref(), fallback_target);
        let status = daily_status(record.as_ref(), target)?;

        Ok(DayView {
            date,
            entry,
            band: progress_band(status.progress, status.is_over_target, policy),
            status,
        })
    }

    /// Create or replace the entry for `date`
    ///
    /// A missing target defaults the same way the day view does. When only
    /// one end of the fasting window is given alongside `fasting_hours`, the
    /// other end is filled in.
    pub async fn upsert_day(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        req: UpsertDailyCaloriesRequest,
        fallback_target: i32,
    ) -> Result<DailyCaloriesRecord, ApiError> {
        req.validate()?;

        let (fast_start, fast_end) = Self::resolve_window(
            req.fast_start_time.as_deref(),
            req.fast_end_time.as_deref(),
            req.fasting_hours,
        )?;

        let target_calories = match req.target_calories {
            Some(target) => target,
            None => {
                let goal = WeeklyGoalRepository::get_by_week_start(db, user_id, week_start(date))
                    .await
                    .map_err(ApiError::Internal)?
                    .map(|g| g.to_weekly_goal());
                default_daily_target(None, goal.as_ref(), fallback_target)
            }
        };

        let fasting_hours = req
            .fasting_hours
            .map(|h| {
                Decimal::from_f64(h)
                    .map(|d| d.round_dp(2))
                    .ok_or_else(|| {
                        ApiError::field("fasting_hours", "Fasting hours must be a valid number")
                    })
            })
            .transpose()?;

        let notes = req
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let input = UpsertDailyCalories {
            user_id,
            date,
            calories_consumed: req.calories_consumed,
            target_calories,
            fasting_hours,
            fast_start_time: fast_start,
            fast_end_time: fast_end,
            notes,
        };

        let record = DailyCaloriesRepository::upsert(db, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(
            user_id = %user_id,
            date = %date,
            calories = record.calories_consumed,
            "Daily calories saved"
        );

        Ok(record)
    }

    /// Remove the entry for `date`
    pub async fn delete_day(db: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<(), ApiError> {
        let deleted = DailyCaloriesRepository::delete_by_date(db, user_id, date)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(format!("No entry logged for {}", date)));
        }

        info!(user_id = %user_id, date = %date, "Daily calories deleted");
        Ok(())
    }

    /// Reject inverted or oversized ranges
    pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
        if start > end {
            return Err(ApiError::field("start", "Start date must not be after end date"));
        }
        if (end - start).num_days() >= MAX_RANGE_DAYS {
            return Err(ApiError::field(
                "end",
                format!("Range cannot exceed {} days", MAX_RANGE_DAYS),
            ));
        }
        Ok(())
    }

    /// Parse the window times and complete a half-specified window
    pub fn resolve_window(
        start: Option<&str>,
        end: Option<&str>,
        hours: Option<f64>,
    ) -> Result<(Option<NaiveTime>, Option<NaiveTime>), ApiError> {
        let start = start
            .map(parse_time_of_day)
            .transpose()
            .map_err(|e| ApiError::field("fast_start_time", e.to_string()))?
            .flatten();
        let end = end
            .map(parse_time_of_day)
            .transpose()
            .map_err(|e| ApiError::field("fast_end_time", e.to_string()))?
            .flatten();

        let resolved = match (start, end, hours) {
            (Some(s), None, Some(h)) => (Some(s), Some(fast_end_time(s, h)?)),
            (None, Some(e), Some(h)) => (Some(fast_start_time(e, h)?), Some(e)),
            other => (other.0, other.1),
        };

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_check_range() {
        assert!(CalorieService::check_range(d(2024, 3, 1), d(2024, 3, 31)).is_ok());
        assert!(CalorieService::check_range(d(2024, 3, 5), d(2024, 3, 5)).is_ok());
        assert!(CalorieService::check_range(d(2024, 3, 5), d(2024, 3, 4)).is_err());
        assert!(CalorieService::check_range(d(2023, 1, 1), d(2024, 6, 1)).is_err());
    }

    #[test]
    fn test_resolve_window_fills_end() {
        let (start, end) = CalorieService::resolve_window(Some("20:00"), None, Some(16.0)).unwrap();
        assert_eq!(start, Some(t(20, 0)));
        assert_eq!(end, Some(t(12, 0)));
    }

    #[test]
    fn test_resolve_window_fills_start() {
        let (start, end) = CalorieService::resolve_window(None, Some("06:00"), Some(8.0)).unwrap();
        assert_eq!(start, Some(t(22, 0)));
        assert_eq!(end, Some(t(6, 0)));
    }

    #[test]
    fn test_resolve_window_keeps_explicit_times() {
        let (start, end) =
            CalorieService::resolve_window(Some("21:00"), Some("09:00"), Some(16.0)).unwrap();
        assert_eq!(start, Some(t(21, 0)));
        assert_eq!(end, Some(t(9, 0)));

        let (start, end) = CalorieService::resolve_window(Some(""), None, None).unwrap();
        assert_eq!((start, end), (None, None));
    }

    #[test]
    fn test_resolve_window_rejects_bad_time() {
        match CalorieService::resolve_window(Some("8pm"), None, Some(16.0)) {
            Err(ApiError::Validation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("fast_start_time"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
