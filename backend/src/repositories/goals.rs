//! Weekly goal repository - one calorie budget per user per Monday-anchored week

use anyhow::Result;
use calorie_tracker_shared::WeeklyGoal;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Weekly goal row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeeklyGoalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    pub total_target_calories: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeeklyGoalRecord {
    pub fn to_weekly_goal(&self) -> WeeklyGoal {
        WeeklyGoal {
            week_start: self.week_start,
            total_target_calories: self.total_target_calories,
        }
    }
}

/// Weekly goal repository
///
/// Callers pass canonical (Monday) week starts; the table rejects others.
pub struct WeeklyGoalRepository;

impl WeeklyGoalRepository {
    pub async fn get_by_week_start(
        pool: &PgPool,
        user_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyGoalRecord>> {
        let record = sqlx::query_as::<_, WeeklyGoalRecord>(
            r#"
            SELECT id, user_id, week_start, total_target_calories, created_at, updated_at
            FROM weekly_goals
            WHERE user_id = $1 AND week_start = $2
            "#,
        )
        .bind(user_id)
        .bind(week_start)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// All goals for a user, newest week first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<WeeklyGoalRecord>> {
        let records = sqlx::query_as::<_, WeeklyGoalRecord>(
            r#"
            SELECT id, user_id, week_start, total_target_calories, created_at, updated_at
            FROM weekly_goals
            WHERE user_id = $1
            ORDER BY week_start DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Create or replace the goal for a week
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        week_start: NaiveDate,
        total_target_calories: i32,
    ) -> Result<WeeklyGoalRecord> {
        let record = sqlx::query_as::<_, WeeklyGoalRecord>(
            r#"
            INSERT INTO weekly_goals (user_id, week_start, total_target_calories)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, week_start) DO UPDATE SET
                total_target_calories = EXCLUDED.total_target_calories,
                updated_at = now()
            RETURNING id, user_id, week_start, total_target_calories, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(week_start)
        .bind(total_target_calories)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete_by_week_start(
        pool: &PgPool,
        user_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<bool> {
        let result = sqlx::query("DELETE FROM weekly_goals WHERE user_id = $1 AND week_start = $2")
            .bind(user_id)
            .bind(week_start)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM weekly_goals WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}
