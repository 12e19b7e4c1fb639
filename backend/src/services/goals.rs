//! Weekly goal service
//!
//! Goals are addressed by any date in their week and stored under the
//! week's Monday.

use crate::error::ApiError;
use crate::repositories::{WeeklyGoalRecord, WeeklyGoalRepository};
use calorie_tracker_shared::{week_start, UpsertWeeklyGoalRequest};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Weekly goal service
pub struct GoalService;

impl GoalService {
    /// All goals, newest week first
    pub async fn list(db: &PgPool, user_id: Uuid) -> Result<Vec<WeeklyGoalRecord>, ApiError> {
        WeeklyGoalRepository::list_for_user(db, user_id)
            .await
            .map_err(ApiError::Internal)
    }

    /// Goal for the week containing `date`, if one is set
    pub async fn find_for_week(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<WeeklyGoalRecord>, ApiError> {
        WeeklyGoalRepository::get_by_week_start(db, user_id, week_start(date))
            .await
            .map_err(ApiError::Internal)
    }

    /// Goal for the week containing `date`
    pub async fn get_for_week(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<WeeklyGoalRecord, ApiError> {
        Self::find_for_week(db, user_id, date).await?.ok_or_else(|| {
            ApiError::NotFound(format!("No weekly goal for week of {}", week_start(date)))
        })
    }

    /// Set the budget for the week containing `date`
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        req: UpsertWeeklyGoalRequest,
    ) -> Result<WeeklyGoalRecord, ApiError> {
        req.validate()?;

        let monday = week_start(date);
        let record = WeeklyGoalRepository::upsert(db, user_id, monday, req.total_target_calories)
            .await
            .map_err(ApiError::Internal)?;

        info!(
            user_id = %user_id,
            week_start = %monday,
            total = record.total_target_calories,
            "Weekly goal saved"
        );

        Ok(record)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<(), ApiError> {
        let monday = week_start(date);
        let deleted = WeeklyGoalRepository::delete_by_week_start(db, user_id, monday)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(format!("No weekly goal for week of {}", monday)));
        }

        info!(user_id = %user_id, week_start = %monday, "Weekly goal deleted");
        Ok(())
    }

    /// Even daily split of a weekly budget
    pub fn daily_average(total_target_calories: i32) -> i32 {
        (f64::from(total_target_calories) / 7.0).round() as i32
    }
}
