//! Custom fasting preset repository

use anyhow::Result;
use calorie_tracker_shared::{FastingPreset, PresetColor};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Custom preset row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FastingPresetRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub hours: Decimal,
    pub description: String,
    pub color: String,
    pub bg_color: String,
    pub text_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FastingPresetRecord {
    pub fn to_preset(&self) -> FastingPreset {
        FastingPreset {
            id: self.id.to_string(),
            name: self.name.clone(),
            hours: self.hours.to_f64().unwrap_or_default(),
            description: self.description.clone(),
            color: PresetColor::from_name(&self.color),
            is_custom: true,
        }
    }
}

/// Input for creating a preset
#[derive(Debug, Clone)]
pub struct CreateFastingPreset {
    pub user_id: Uuid,
    pub name: String,
    pub hours: Decimal,
    pub description: String,
    pub color: PresetColor,
}

/// Partial update; `None` leaves a column unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateFastingPreset {
    pub name: Option<String>,
    pub hours: Option<Decimal>,
    pub description: Option<String>,
    pub color: Option<PresetColor>,
}

/// Fasting preset repository
pub struct FastingPresetRepository;

impl FastingPresetRepository {
    /// A user's presets in creation order
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<FastingPresetRecord>> {
        let records = sqlx::query_as::<_, FastingPresetRecord>(
            r#"
            SELECT id, user_id, name, hours, description, color, bg_color, text_color,
                   created_at, updated_at
            FROM user_fasting_presets
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn get_by_id(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FastingPresetRecord>> {
        let record = sqlx::query_as::<_, FastingPresetRecord>(
            r#"
            SELECT id, user_id, name, hours, description, color, bg_color, text_color,
                   created_at, updated_at
            FROM user_fasting_presets
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn create(pool: &PgPool, input: CreateFastingPreset) -> Result<FastingPresetRecord> {
        let record = sqlx::query_as::<_, FastingPresetRecord>(
            r#"
            INSERT INTO user_fasting_presets (
                user_id, name, hours, description, color, bg_color, text_color
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, hours, description, color, bg_color, text_color,
                      created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.name)
        .bind(input.hours)
        .bind(input.description)
        .bind(input.color.name())
        .bind(input.color.bg_class())
        .bind(input.color.text_class())
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Apply a partial update; colour classes follow the colour name
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        input: UpdateFastingPreset,
    ) -> Result<Option<FastingPresetRecord>> {
        let record = sqlx::query_as::<_, FastingPresetRecord>(
            r#"
            UPDATE user_fasting_presets SET
                name = COALESCE($3, name),
                hours = COALESCE($4, hours),
                description = COALESCE($5, description),
                color = COALESCE($6, color),
                bg_color = COALESCE($7, bg_color),
                text_color = COALESCE($8, text_color),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, hours, description, color, bg_color, text_color,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(input.name)
        .bind(input.hours)
        .bind(input.description)
        .bind(input.color.map(|c| c.name()))
        .bind(input.color.map(|c| c.bg_class()))
        .bind(input.color.map(|c| c.text_class()))
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_fasting_presets WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM user_fasting_presets WHERE user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_maps_to_custom_preset() {
        let id = Uuid::new_v4();
        let record = FastingPresetRecord {
            id,
            user_id: Uuid::new_v4(),
            name: "Weekday".to_string(),
            hours: Decimal::new(145, 1),
            description: String::new(),
            color: "mauve".to_string(),
            bg_color: "bg-gray-500".to_string(),
            text_color: "text-white".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let preset = record.to_preset();
        assert_eq!(preset.id, id.to_string());
        assert_eq!(preset.hours, 14.5);
        assert_eq!(preset.color, PresetColor::Gray);
        assert!(preset.is_custom);
    }
}
