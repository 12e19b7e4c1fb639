//! Fasting service - presets, live status and window bounds

use crate::error::ApiError;
use crate::repositories::{
    CreateFastingPreset, DailyCaloriesRepository, FastingPresetRepository, UpdateFastingPreset,
};
use calorie_tracker_shared::presets::custom_preset;
use calorie_tracker_shared::validation::{validate_preset_hours, validate_preset_name};
use calorie_tracker_shared::{
    default_presets, fasting_status, find_preset, parse_time_of_day, CreateFastingPresetRequest,
    FastingPreset, FastingStatus, FastingWindow, PresetColor, UpdateFastingPresetRequest,
    WindowShape,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Live status of a day's scheduled fast
#[derive(Debug, Clone)]
pub struct FastView {
    pub date: NaiveDate,
    pub window: Option<FastingWindow>,
    pub status: FastingStatus,
}

impl FastView {
    pub fn shape(&self) -> Option<WindowShape> {
        self.window.map(|w| w.shape())
    }
}

/// Fasting service
pub struct FastingService;

impl FastingService {
    /// Built-in presets followed by the user's own, oldest first
    pub async fn list_presets(db: &PgPool, user_id: Uuid) -> Result<Vec<FastingPreset>, ApiError> {
        let custom = FastingPresetRepository::list_for_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(default_presets()
            .iter()
            .cloned()
            .chain(custom.iter().map(|r| r.to_preset()))
            .collect())
    }

    /// A built-in preset by slug or one of the user's own by id
    pub async fn get_preset(
        db: &PgPool,
        user_id: Uuid,
        preset_id: &str,
    ) -> Result<FastingPreset, ApiError> {
        if let Some(preset) = find_preset(preset_id, &[]) {
            return Ok(preset.clone());
        }

        let id = Uuid::parse_str(preset_id)
            .map_err(|_| ApiError::NotFound("Fasting preset not found".to_string()))?;

        FastingPresetRepository::get_by_id(db, user_id, id)
            .await
            .map_err(ApiError::Internal)?
            .map(|r| r.to_preset())
            .ok_or_else(|| ApiError::NotFound("Fasting preset not found".to_string()))
    }

    pub async fn create_preset(
        db: &PgPool,
        user_id: Uuid,
        req: CreateFastingPresetRequest,
    ) -> Result<FastingPreset, ApiError> {
        req.validate()?;

        // Id is assigned by the database
        let draft = custom_preset(
            String::new(),
            &req.name,
            req.hours,
            req.description.as_deref(),
            req.color.as_deref().unwrap_or_default(),
        )?;

        let input = CreateFastingPreset {
            user_id,
            name: draft.name,
            hours: Self::hours_decimal(draft.hours)?,
            description: draft.description,
            color: draft.color,
        };

        let record = FastingPresetRepository::create(db, input)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id = %user_id, preset_id = %record.id, "Fasting preset created");
        Ok(record.to_preset())
    }

    pub async fn update_preset(
        db: &PgPool,
        user_id: Uuid,
        preset_id: &str,
        req: UpdateFastingPresetRequest,
    ) -> Result<FastingPreset, ApiError> {
        req.validate()?;
        let id = Self::custom_preset_id(preset_id)?;

        if let Some(name) = &req.name {
            validate_preset_name(name).map_err(|msg| ApiError::field("name", msg))?;
        }
        let hours = match req.hours {
            Some(h) => {
                validate_preset_hours(h).map_err(|msg| ApiError::field("hours", msg))?;
                Some(Self::hours_decimal(h)?)
            }
            None => None,
        };

        let input = UpdateFastingPreset {
            name: req.name.map(|n| n.trim().to_string()),
            hours,
            description: req.description,
            color: req.color.as_deref().map(PresetColor::from_name),
        };

        let record = FastingPresetRepository::update(db, user_id, id, input)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Fasting preset not found".to_string()))?;

        info!(user_id = %user_id, preset_id = %id, "Fasting preset updated");
        Ok(record.to_preset())
    }

    pub async fn delete_preset(
        db: &PgPool,
        user_id: Uuid,
        preset_id: &str,
    ) -> Result<(), ApiError> {
        let id = Self::custom_preset_id(preset_id)?;

        let deleted = FastingPresetRepository::delete(db, user_id, id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(ApiError::NotFound("Fasting preset not found".to_string()));
        }

        info!(user_id = %user_id, preset_id = %id, "Fasting preset deleted");
        Ok(())
    }

    /// Status at `now` of the fast stored on `date`'s entry
    pub async fn status(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        now: NaiveTime,
    ) -> Result<FastView, ApiError> {
        let entry = DailyCaloriesRepository::get_by_date(db, user_id, date)
            .await
            .map_err(ApiError::Internal)?;

        let window = entry.and_then(|e| match (e.fast_start_time, e.fast_end_time) {
            (Some(start), Some(end)) => Some(FastingWindow::new(start, end)),
            _ => None,
        });

        Ok(FastView {
            date,
            window,
            status: fasting_status(window.map(|w| w.start), window.map(|w| w.end), now),
        })
    }

    /// Window of `hours` given exactly one of its bounds
    pub fn window(
        start: Option<&str>,
        end: Option<&str>,
        hours: f64,
    ) -> Result<FastingWindow, ApiError> {
        let parse = |field: &'static str, value: Option<&str>| {
            value
                .map(parse_time_of_day)
                .transpose()
                .map(Option::flatten)
                .map_err(|e| ApiError::field(field, e.to_string()))
        };

        match (parse("start", start)?, parse("end", end)?) {
            (Some(start), None) => Ok(FastingWindow::starting_at(start, hours)?),
            (None, Some(end)) => Ok(FastingWindow::ending_at(end, hours)?),
            _ => Err(ApiError::validation(
                "Provide exactly one of start or end",
            )),
        }
    }

    /// Built-in presets are read-only; custom ones are addressed by UUID
    fn custom_preset_id(preset_id: &str) -> Result<Uuid, ApiError> {
        if default_presets().iter().any(|p| p.id == preset_id) {
            return Err(ApiError::BadRequest(format!(
                "Built-in preset '{}' cannot be modified",
                preset_id
            )));
        }

        Uuid::parse_str(preset_id)
            .map_err(|_| ApiError::NotFound("Fasting preset not found".to_string()))
    }

    fn hours_decimal(hours: f64) -> Result<Decimal, ApiError> {
        Decimal::from_f64(hours)
            .map(|d| d.round_dp(2))
            .ok_or_else(|| ApiError::field("hours", "Hours must be a valid number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_window_from_start() {
        let window = FastingService::window(Some("20:00"), None, 16.0).unwrap();
        assert_eq!(window.end, t(12, 0));
        assert_eq!(window.shape(), WindowShape::Overnight);
    }

    #[test]
    fn test_window_from_end() {
        let window = FastingService::window(None, Some("12:00"), 4.0).unwrap();
        assert_eq!(window.start, t(8, 0));
        assert_eq!(window.shape(), WindowShape::SameDay);
    }

    #[test]
    fn test_window_requires_exactly_one_bound() {
        assert!(FastingService::window(None, None, 16.0).is_err());
        assert!(FastingService::window(Some("20:00"), Some("12:00"), 16.0).is_err());
        // Blank counts as absent
        assert!(FastingService::window(Some(""), Some("12:00"), 16.0).is_ok());
    }

    #[test]
    fn test_window_rejects_bad_input() {
        assert!(FastingService::window(Some("25:00"), None, 16.0).is_err());
        assert!(FastingService::window(Some("20:00"), None, 169.0).is_err());
    }

    #[test]
    fn test_builtin_presets_are_read_only() {
        assert!(matches!(
            FastingService::custom_preset_id("lean-gains"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            FastingService::custom_preset_id("nope"),
            Err(ApiError::NotFound(_))
        ));
        let id = Uuid::new_v4();
        assert_eq!(FastingService::custom_preset_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_fast_view_shape() {
        let view = FastView {
            date: NaiveDate::from_ymd_opt(2024, 3, 13).unwrap(),
            window: Some(FastingWindow::new(t(22, 0), t(6, 0))),
            status: FastingStatus::idle(),
        };
        assert_eq!(view.shape(), Some(WindowShape::Overnight));
    }
}
