//! Input validation functions
//!
//! Range checks for user-entered values. Request DTOs use the `validator`
//! derive for the same bounds; these functions serve callers that hold
//! plain values (the WASM bindings and service-level checks).

/// Largest calorie figure accepted for a single day
pub const MAX_DAILY_CALORIES: i32 = 10_000;

/// Bounds for a weekly calorie budget
pub const MIN_WEEKLY_TARGET: i32 = 1_000;
pub const MAX_WEEKLY_TARGET: i32 = 50_000;

/// Longest preset name
pub const MAX_PRESET_NAME_LEN: usize = 50;

/// Validate a daily calorie value (consumed or target)
pub fn validate_calories(calories: i32) -> Result<(), String> {
    if calories < 0 {
        return Err("Calories cannot be negative".to_string());
    }
    if calories > MAX_DAILY_CALORIES {
        return Err(format!("Calories must be at most {}", MAX_DAILY_CALORIES));
    }
    Ok(())
}

/// Validate a weekly calorie budget
pub fn validate_weekly_target(total: i32) -> Result<(), String> {
    if total < MIN_WEEKLY_TARGET {
        return Err(format!(
            "Weekly target must be at least {}",
            MIN_WEEKLY_TARGET
        ));
    }
    if total > MAX_WEEKLY_TARGET {
        return Err(format!("Weekly target must be at most {}", MAX_WEEKLY_TARGET));
    }
    Ok(())
}

/// Validate hours fasted on a logged day (0 to 168)
pub fn validate_fasting_hours(hours: f64) -> Result<(), String> {
    if hours.is_nan() || hours.is_infinite() {
        return Err("Fasting hours must be a valid number".to_string());
    }
    if hours < 0.0 {
        return Err("Fasting hours cannot be negative".to_string());
    }
    if hours > crate::fasting::MAX_FASTING_HOURS {
        return Err("Fasting hours cannot exceed 168 (one week)".to_string());
    }
    Ok(())
}

/// Validate the length of a fasting preset (greater than 0, at most 168)
pub fn validate_preset_hours(hours: f64) -> Result<(), String> {
    validate_fasting_hours(hours)?;
    if hours == 0.0 {
        return Err("Preset must last more than 0 hours".to_string());
    }
    Ok(())
}

/// Validate a preset name
pub fn validate_preset_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_PRESET_NAME_LEN {
        return Err(format!(
            "Name must be at most {} characters",
            MAX_PRESET_NAME_LEN
        ));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "calories_consumed" => "Calories Consumed",
        "target_calories" => "Daily Target",
        "total_target_calories" => "Weekly Target",
        "fasting_hours" => "Fasting Hours",
        "fast_start_time" => "Fast Start",
        "fast_end_time" => "Fast End",
        "fast_time" => "Fasting Time",
        "week_start" => "Week",
        "hours" => "Duration",
        "name" => "Name",
        "notes" => "Notes",
        "date" => "Date",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ValidationError {}

impl From<crate::errors::CalcError> for ValidationError {
    fn from(err: crate::errors::CalcError) -> Self {
        ValidationError::new(err.field(), &err.to_string())
    }
}
