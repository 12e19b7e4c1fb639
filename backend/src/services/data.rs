//! Data management service
//!
//! Bulk deletion of a user's rows, scoped to one table or all of them.

use crate::error::ApiError;
use crate::repositories::{DailyCaloriesRepository, FastingPresetRepository, WeeklyGoalRepository};
use calorie_tracker_shared::{DeletionScope, DeletionSummaryResponse};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Data management service
pub struct DataService;

impl DataService {
    /// Delete a user's data within one transaction
    ///
    /// Either every table in scope is cleared or none is.
    pub async fn delete_user_data(
        pool: &PgPool,
        user_id: Uuid,
        scope: DeletionScope,
    ) -> Result<DeletionSummaryResponse, ApiError> {
        let mut summary = DeletionSummaryResponse {
            scope,
            daily_calories: 0,
            weekly_goals: 0,
            fasting_presets: 0,
        };

        let mut tx = pool.begin().await?;

        if scope.includes_calories() {
            summary.daily_calories = DailyCaloriesRepository::delete_all_for_user(&mut *tx, user_id)
                .await
                .map_err(ApiError::Internal)?;
        }
        if scope.includes_goals() {
            summary.weekly_goals = WeeklyGoalRepository::delete_all_for_user(&mut *tx, user_id)
                .await
                .map_err(ApiError::Internal)?;
        }
        if scope.includes_presets() {
            summary.fasting_presets =
                FastingPresetRepository::delete_all_for_user(&mut *tx, user_id)
                    .await
                    .map_err(ApiError::Internal)?;
        }

        tx.commit().await?;

        info!(
            user_id = %user_id,
            scope = ?scope,
            daily_calories = summary.daily_calories,
            weekly_goals = summary.weekly_goals,
            fasting_presets = summary.fasting_presets,
            "User data deleted"
        );

        Ok(summary)
    }
}
