//! Calorie Tracker WASM Module
//!
//! WebAssembly bindings that let the browser run the calculation core
//! directly. Dates are passed as `YYYY-MM-DD` strings and times as `HH:MM`;
//! structured results come back as JSON strings.

use calorie_tracker_shared::energy::{
    calculate_bmr, calculate_tdee, maintenance_weekly_target, ActivityLevel, BiologicalSex,
};
use calorie_tracker_shared::validation::{
    validate_calories, validate_fasting_hours, validate_weekly_target, ValidationError,
};
use calorie_tracker_shared::{
    self as shared, default_presets, parse_time_of_day, CaloriePolicy, DailyRecord,
    FastingPresetResponse, WeeklyGoal,
};
use chrono::{NaiveDate, NaiveTime};
use wasm_bindgen::prelude::*;

type BindingResult<T> = Result<T, String>;

fn parse_date(input: &str) -> BindingResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: {:?} (expected YYYY-MM-DD)", input))
}

fn parse_required_time(input: &str) -> BindingResult<NaiveTime> {
    parse_time_of_day(input)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Time is required".to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> BindingResult<String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn week_start_inner(date: &str) -> BindingResult<String> {
    Ok(shared::week_start(parse_date(date)?).to_string())
}

fn week_end_inner(date: &str) -> BindingResult<String> {
    Ok(shared::week_end(parse_date(date)?).to_string())
}

fn week_dates_inner(date: &str) -> BindingResult<String> {
    let dates: Vec<String> =
        shared::week_dates(parse_date(date)?).iter().map(|d| d.to_string()).collect();
    to_json(&dates)
}

fn remaining_days_inner(date: &str, today: &str) -> BindingResult<u32> {
    Ok(shared::remaining_days_in_week(parse_date(date)?, parse_date(today)?))
}

fn daily_status_inner(consumed: Option<i32>, target: i32) -> BindingResult<String> {
    // Only the consumed figure matters to the status; date is a placeholder
    let record = consumed.map(|c| DailyRecord::new(NaiveDate::MIN, c, target));
    let status = shared::daily_status(record.as_ref(), target).map_err(|e| e.to_string())?;
    to_json(&status)
}

fn weekly_status_inner(
    records_json: &str,
    weekly_target: Option<i32>,
    week_of: &str,
    today: &str,
) -> BindingResult<String> {
    let records: Vec<DailyRecord> =
        serde_json::from_str(records_json).map_err(|e| format!("Invalid records: {}", e))?;
    let week_of = parse_date(week_of)?;
    let goal = weekly_target.map(|total| WeeklyGoal::for_week_of(week_of, total));

    let status = shared::weekly_status_with_policy(
        &records,
        goal.as_ref(),
        week_of,
        parse_date(today)?,
        &CaloriePolicy::default(),
    )
    .map_err(|e| e.to_string())?;
    to_json(&status)
}

fn fast_end_time_inner(start: &str, hours: f64) -> BindingResult<String> {
    let end = shared::fast_end_time(parse_required_time(start)?, hours).map_err(|e| e.to_string())?;
    Ok(shared::format_time_of_day(end))
}

fn fast_start_time_inner(end: &str, hours: f64) -> BindingResult<String> {
    let start =
        shared::fast_start_time(parse_required_time(end)?, hours).map_err(|e| e.to_string())?;
    Ok(shared::format_time_of_day(start))
}

fn fasting_status_inner(start: &str, end: &str, now: &str) -> BindingResult<String> {
    let now = parse_required_time(now)?;
    let status = shared::fasting_status_from_strings(Some(start), Some(end), now)
        .map_err(|e| e.to_string())?;
    to_json(&status)
}

fn presets_inner() -> BindingResult<String> {
    let presets: Vec<FastingPresetResponse> = default_presets().iter().map(Into::into).collect();
    to_json(&presets)
}

fn tdee_inner(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    is_male: bool,
    activity_level: &str,
) -> BindingResult<i32> {
    let level: ActivityLevel =
        serde_json::from_value(serde_json::Value::String(activity_level.to_string()))
            .map_err(|_| format!("Unknown activity level: {}", activity_level))?;
    let sex = if is_male { BiologicalSex::Male } else { BiologicalSex::Female };
    Ok(calculate_tdee(calculate_bmr(weight_kg, height_cm, age_years, sex), level))
}

fn maintenance_inner(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    is_male: bool,
    activity_level: &str,
) -> BindingResult<i32> {
    Ok(maintenance_weekly_target(tdee_inner(
        weight_kg,
        height_cm,
        age_years,
        is_male,
        activity_level,
    )?))
}

/// Check a daily entry the way the server will, before submitting it
fn validate_entry_inner(
    calories_consumed: i32,
    target_calories: Option<i32>,
    fasting_hours: Option<f64>,
) -> BindingResult<()> {
    let check = |field: &str, result: Result<(), String>| {
        result.map_err(|msg| ValidationError::new(field, &msg).user_message())
    };

    check("calories_consumed", validate_calories(calories_consumed))?;
    if let Some(target) = target_calories {
        check("target_calories", validate_calories(target))?;
    }
    if let Some(hours) = fasting_hours {
        check("fasting_hours", validate_fasting_hours(hours))?;
    }
    Ok(())
}

fn validate_weekly_target_inner(total: i32) -> BindingResult<()> {
    validate_weekly_target(total)
        .map_err(|msg| ValidationError::new("total_target_calories", &msg).user_message())
}

// ============================================================================
// JS exports
// ============================================================================

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Monday of the week containing `date`
#[wasm_bindgen(js_name = weekStart)]
pub fn week_start(date: &str) -> Result<String, JsValue> {
    week_start_inner(date).map_err(js_err)
}

/// Sunday of the week containing `date`
#[wasm_bindgen(js_name = weekEnd)]
pub fn week_end(date: &str) -> Result<String, JsValue> {
    week_end_inner(date).map_err(js_err)
}

/// Monday through Sunday of the week containing `date`, as a JSON array
#[wasm_bindgen(js_name = weekDates)]
pub fn week_dates(date: &str) -> Result<String, JsValue> {
    week_dates_inner(date).map_err(js_err)
}

#[wasm_bindgen(js_name = remainingDaysInWeek)]
pub fn remaining_days_in_week(date: &str, today: &str) -> Result<u32, JsValue> {
    remaining_days_inner(date, today).map_err(js_err)
}

/// `consumed` is undefined when nothing has been logged for the day
#[wasm_bindgen(js_name = dailyStatus)]
pub fn daily_status(consumed: Option<i32>, target: i32) -> Result<String, JsValue> {
    daily_status_inner(consumed, target).map_err(js_err)
}

/// `records_json` is an array of daily records
#[wasm_bindgen(js_name = weeklyStatus)]
pub fn weekly_status(
    records_json: &str,
    weekly_target: Option<i32>,
    week_of: &str,
    today: &str,
) -> Result<String, JsValue> {
    weekly_status_inner(records_json, weekly_target, week_of, today).map_err(js_err)
}

#[wasm_bindgen(js_name = fastEndTime)]
pub fn fast_end_time(start: &str, hours: f64) -> Result<String, JsValue> {
    fast_end_time_inner(start, hours).map_err(js_err)
}

#[wasm_bindgen(js_name = fastStartTime)]
pub fn fast_start_time(end: &str, hours: f64) -> Result<String, JsValue> {
    fast_start_time_inner(end, hours).map_err(js_err)
}

#[wasm_bindgen(js_name = fastingStatus)]
pub fn fasting_status(start: &str, end: &str, now: &str) -> Result<String, JsValue> {
    fasting_status_inner(start, end, now).map_err(js_err)
}

#[wasm_bindgen(js_name = formatFastingDuration)]
pub fn format_fasting_duration(hours: f64) -> String {
    shared::format_fasting_duration(hours)
}

#[wasm_bindgen(js_name = defaultPresets)]
pub fn presets() -> Result<String, JsValue> {
    presets_inner().map_err(js_err)
}

/// Total daily energy expenditure (Mifflin-St Jeor BMR times activity)
#[wasm_bindgen(js_name = calculateTdee)]
pub fn tdee(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    is_male: bool,
    activity_level: &str,
) -> Result<i32, JsValue> {
    tdee_inner(weight_kg, height_cm, age_years, is_male, activity_level).map_err(js_err)
}

/// Weekly budget that holds weight steady
#[wasm_bindgen(js_name = maintenanceWeeklyTarget)]
pub fn maintenance_target(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    is_male: bool,
    activity_level: &str,
) -> Result<i32, JsValue> {
    maintenance_inner(weight_kg, height_cm, age_years, is_male, activity_level).map_err(js_err)
}

#[wasm_bindgen(js_name = validateEntry)]
pub fn validate_entry(
    calories_consumed: i32,
    target_calories: Option<i32>,
    fasting_hours: Option<f64>,
) -> Result<(), JsValue> {
    validate_entry_inner(calories_consumed, target_calories, fasting_hours).map_err(js_err)
}

#[wasm_bindgen(js_name = validateWeeklyTarget)]
pub fn validate_weekly_goal(total: i32) -> Result<(), JsValue> {
    validate_weekly_target_inner(total).map_err(js_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_bounds() {
        assert_eq!(week_start_inner("2024-03-13").unwrap(), "2024-03-11");
        assert_eq!(week_end_inner("2024-03-13").unwrap(), "2024-03-17");
        assert!(week_start_inner("13/03/2024").is_err());
    }

    #[test]
    fn test_week_dates_json() {
        let json = week_dates_inner("2024-03-13").unwrap();
        let dates: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], "2024-03-11");
        assert_eq!(dates[6], "2024-03-17");
        assert!(week_dates_inner("2024-13-01").is_err());
    }

    #[test]
    fn test_remaining_days() {
        assert_eq!(remaining_days_inner("2024-03-13", "2024-03-13").unwrap(), 5);
    }

    #[test]
    fn test_daily_status_json() {
        let json = daily_status_inner(Some(2500), 2000).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["is_over_target"], true);
        assert_eq!(value["remaining"], 0);

        let json = daily_status_inner(None, 2000).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["consumed"], 0);
        assert_eq!(value["remaining"], 2000);
    }

    #[test]
    fn test_weekly_status_json() {
        let records = r#"[
            {"date":"2024-03-11","calories_consumed":2000,"target_calories":2000},
            {"date":"2024-03-12","calories_consumed":2000,"target_calories":2000}
        ]"#;
        let json = weekly_status_inner(records, Some(14000), "2024-03-13", "2024-03-13").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_consumed"], 4000);
        assert_eq!(value["remaining"], 10000);
        assert_eq!(value["remaining_days"], 5);
        assert_eq!(value["daily_recommendation"], 2000);
        assert_eq!(value["is_on_track"], true);

        assert!(weekly_status_inner("not json", None, "2024-03-13", "2024-03-13").is_err());
    }

    #[test]
    fn test_fast_bounds() {
        assert_eq!(fast_end_time_inner("20:00", 16.0).unwrap(), "12:00");
        assert_eq!(fast_start_time_inner("12:00", 16.0).unwrap(), "20:00");
        assert!(fast_end_time_inner("", 16.0).is_err());
        assert!(fast_end_time_inner("20:00", 500.0).is_err());
    }

    #[test]
    fn test_fasting_status_json() {
        let json = fasting_status_inner("22:00", "06:00", "02:00").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["is_fasting"], true);
        assert_eq!(value["time_remaining_minutes"], 240);
        assert_eq!(value["progress_percent"], 50.0);
    }

    #[test]
    fn test_presets_json() {
        let json = presets_inner().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 6);
        assert_eq!(value[1]["name"], "16:8");
    }

    #[test]
    fn test_tdee() {
        assert_eq!(tdee_inner(80.0, 180.0, 30, true, "sedentary").unwrap(), 2136);
        assert!(tdee_inner(80.0, 180.0, 30, true, "couch").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_fasting_duration(36.0), "1d 12h");
    }

    #[test]
    fn test_maintenance_target() {
        assert_eq!(
            maintenance_inner(80.0, 180.0, 30, true, "sedentary").unwrap(),
            2136 * 7
        );
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry_inner(1800, Some(2000), Some(16.0)).is_ok());
        assert_eq!(
            validate_entry_inner(-1, None, None).unwrap_err(),
            "Calories Consumed: Calories cannot be negative"
        );
        assert!(validate_entry_inner(100, Some(20_000), None)
            .unwrap_err()
            .starts_with("Daily Target"));
        assert!(validate_entry_inner(100, None, Some(200.0))
            .unwrap_err()
            .starts_with("Fasting Hours"));
    }

    #[test]
    fn test_validate_weekly_target() {
        assert!(validate_weekly_target_inner(14_000).is_ok());
        assert!(validate_weekly_target_inner(500)
            .unwrap_err()
            .starts_with("Weekly Target"));
    }
}
