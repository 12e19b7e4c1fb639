//! Daily calorie repository - one row per user per calendar day

use anyhow::Result;
use calorie_tracker_shared::DailyRecord;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Daily calorie row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyCaloriesRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub calories_consumed: i32,
    pub target_calories: i32,
    pub fasting_hours: Option<Decimal>,
    pub fast_start_time: Option<NaiveTime>,
    pub fast_end_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyCaloriesRecord {
    /// Storage-agnostic view used by the calculation core
    pub fn to_daily_record(&self) -> DailyRecord {
        DailyRecord {
            date: self.date,
            calories_consumed: self.calories_consumed,
            target_calories: self.target_calories,
            fasting_hours: self.fasting_hours.and_then(|h| h.to_f64()),
            fast_start_time: self.fast_start_time,
            fast_end_time: self.fast_end_time,
            notes: self.notes.clone(),
        }
    }
}

/// Input for creating or replacing a day's entry
#[derive(Debug, Clone)]
pub struct UpsertDailyCalories {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub calories_consumed: i32,
    pub target_calories: i32,
    pub fasting_hours: Option<Decimal>,
    pub fast_start_time: Option<NaiveTime>,
    pub fast_end_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

/// Daily calorie repository
pub struct DailyCaloriesRepository;

impl DailyCaloriesRepository {
    /// Entry for one day, if logged
    pub async fn get_by_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyCaloriesRecord>> {
        let record = sqlx::query_as::<_, DailyCaloriesRecord>(
            r#"
            SELECT id, user_id, date, calories_consumed, target_calories, fasting_hours,
                   fast_start_time, fast_end_time, notes, created_at, updated_at
            FROM daily_calories
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Entries between two dates inclusive, oldest first
    pub async fn get_range(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCaloriesRecord>> {
        let records = sqlx::query_as::<_, DailyCaloriesRecord>(
            r#"
            SELECT id, user_id, date, calories_consumed, target_calories, fasting_hours,
                   fast_start_time, fast_end_time, notes, created_at, updated_at
            FROM daily_calories
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Insert the day's entry or replace the existing one
    pub async fn upsert(pool: &PgPool, input: UpsertDailyCalories) -> Result<DailyCaloriesRecord> {
        let record = sqlx::query_as::<_, DailyCaloriesRecord>(
            r#"
            INSERT INTO daily_calories (
                user_id, date, calories_consumed, target_calories, fasting_hours,
                fast_start_time, fast_end_time, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, date) DO UPDATE SET
                calories_consumed = EXCLUDED.calories_consumed,
                target_calories = EXCLUDED.target_calories,
                fasting_hours = EXCLUDED.fasting_hours,
                fast_start_time = EXCLUDED.fast_start_time,
                fast_end_time = EXCLUDED.fast_end_time,
                notes = EXCLUDED.notes,
                updated_at = now()
            RETURNING id, user_id, date, calories_consumed, target_calories, fasting_hours,
                      fast_start_time, fast_end_time, notes, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.date)
        .bind(input.calories_consumed)
        .bind(input.target_calories)
        .bind(input.fasting_hours)
        .bind(input.fast_start_time)
        .bind(input.fast_end_time)
        .bind(input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Remove one day's entry; false when nothing was logged
    pub async fn delete_by_date(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<bool> {
        let result = sqlx::query("DELETE FROM daily_calories WHERE user_id = $1 AND date = $2")
            .bind(user_id)
            .bind(date)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every entry for a user, returning the row count
    pub async fn delete_all_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM daily_calories WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}
