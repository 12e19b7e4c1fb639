//! Statistics service - weekly overview and range summaries

use crate::error::ApiError;
use crate::repositories::{DailyCaloriesRepository, WeeklyGoalRecord, WeeklyGoalRepository};
use crate::services::calories::CalorieService;
use calorie_tracker_shared::{
    range_summary, week_breakdown, week_end, week_start, weekly_status_with_policy, CaloriePolicy,
    DailyRecord, DayBreakdown, RangeSummary, WeeklyStatus,
};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Everything the weekly overview shows
#[derive(Debug, Clone)]
pub struct WeekStats {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub goal: Option<WeeklyGoalRecord>,
    pub status: WeeklyStatus,
    pub days: Vec<DayBreakdown>,
}

/// Statistics service
pub struct StatsService;

impl StatsService {
    /// Weekly status and per-day breakdown for the week containing `week_of`
    pub async fn week_stats(
        db: &PgPool,
        user_id: Uuid,
        week_of: NaiveDate,
        today: NaiveDate,
        fallback_target: i32,
        policy: &CaloriePolicy,
    ) -> Result<WeekStats, ApiError> {
        let monday = week_start(week_of);
        let sunday = week_end(week_of);

        let records: Vec<DailyRecord> =
            DailyCaloriesRepository::get_range(db, user_id, monday, sunday)
                .await
                .map_err(ApiError::Internal)?
                .iter()
                .map(|r| r.to_daily_record())
                .collect();
        let goal = WeeklyGoalRepository::get_by_week_start(db, user_id, monday)
            .await
            .map_err(ApiError::Internal)?;

        debug!(
            user_id = %user_id,
            week_start = %monday,
            entries = records.len(),
            has_goal = goal.is_some(),
            "Computing weekly stats"
        );

        let core_goal = goal.as_ref().map(|g| g.to_weekly_goal());
        let status =
            weekly_status_with_policy(&records, core_goal.as_ref(), week_of, today, policy)?;
        let days = week_breakdown(
            &records,
            core_goal.as_ref(),
            week_of,
            today,
            fallback_target,
            policy,
        )?;

        Ok(WeekStats {
            week_start: monday,
            week_end: sunday,
            goal,
            status,
            days,
        })
    }

    /// Aggregate accuracy statistics over a date range
    pub async fn range_summary(
        db: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        policy: &CaloriePolicy,
    ) -> Result<RangeSummary, ApiError> {
        CalorieService::check_range(start, end)?;

        let records: Vec<DailyRecord> = DailyCaloriesRepository::get_range(db, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?
            .iter()
            .map(|r| r.to_daily_record())
            .collect();

        Ok(range_summary(&records, policy)?)
    }
}
