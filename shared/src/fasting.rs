//! Fasting window calculations
//!
//! A fasting window is a start and an end time of day with no date attached.
//! When the start is not before the end the window runs overnight and its end
//! belongs to the following day.
//!
//! # Time strings
//!
//! Times are accepted as `H:MM`, `HH:MM` or `HH:MM:SS` (the text form of a
//! PostgreSQL `time`). Seconds are validated and then discarded, since all
//! window arithmetic works at minute granularity.

use crate::errors::{CalcError, CalcResult};
use chrono::{Duration, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Minutes in one day
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Longest fast accepted anywhere in the system (one week)
pub const MAX_FASTING_HOURS: f64 = 168.0;

static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("time-of-day pattern is valid")
});

// ============================================================================
// Parsing and formatting
// ============================================================================

/// Parse a time of day
///
/// Blank input means "not set" and yields `Ok(None)`.
pub fn parse_time_of_day(input: &str) -> CalcResult<Option<NaiveTime>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || CalcError::InvalidTime(input.to_string());
    let caps = TIME_OF_DAY.captures(trimmed).ok_or_else(invalid)?;

    let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
    let second: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().map_err(|_| invalid())?,
        None => 0,
    };
    if second > 59 {
        return Err(invalid());
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
        .map(Some)
        .ok_or_else(invalid)
}

/// Format a time of day as `HH:MM`
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Human-readable duration: `16h`, `2d`, `1d 12h`
pub fn format_fasting_duration(hours: f64) -> String {
    if hours < 24.0 {
        format!("{}h", hours)
    } else if hours % 24.0 == 0.0 {
        format!("{}d", hours / 24.0)
    } else {
        let days = (hours / 24.0).floor();
        format!("{}d {}h", days, hours % 24.0)
    }
}

// ============================================================================
// Complementary bounds
// ============================================================================

/// Convert a fasting duration to whole minutes
///
/// Fails for negative, non-finite, or over-168-hour durations.
pub fn duration_minutes(hours: f64) -> CalcResult<i64> {
    if !hours.is_finite() || !(0.0..=MAX_FASTING_HOURS).contains(&hours) {
        return Err(CalcError::InvalidDuration(hours));
    }
    Ok((hours * 60.0).round() as i64)
}

/// End of a fast that starts at `start` and lasts `hours`, wrapping past midnight
pub fn fast_end_time(start: NaiveTime, hours: f64) -> CalcResult<NaiveTime> {
    let minutes = duration_minutes(hours)?;
    Ok(start + Duration::minutes(minutes))
}

/// Start of a fast that ends at `end` after lasting `hours`, wrapping before midnight
pub fn fast_start_time(end: NaiveTime, hours: f64) -> CalcResult<NaiveTime> {
    let minutes = duration_minutes(hours)?;
    Ok(end - Duration::minutes(minutes))
}

// ============================================================================
// Windows and live status
// ============================================================================

/// Whether a window stays within one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowShape {
    SameDay,
    Overnight,
}

/// A fasting window between two times of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastingWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl FastingWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Window of `hours` beginning at `start`
    pub fn starting_at(start: NaiveTime, hours: f64) -> CalcResult<Self> {
        Ok(Self::new(start, fast_end_time(start, hours)?))
    }

    /// Window of `hours` finishing at `end`
    pub fn ending_at(end: NaiveTime, hours: f64) -> CalcResult<Self> {
        Ok(Self::new(fast_start_time(end, hours)?, end))
    }

    pub fn shape(&self) -> WindowShape {
        if minute_of_day(self.start) < minute_of_day(self.end) {
            WindowShape::SameDay
        } else {
            WindowShape::Overnight
        }
    }

    /// Total length of the window in minutes
    pub fn length_minutes(&self) -> i64 {
        let (s, e) = (minute_of_day(self.start), minute_of_day(self.end));
        match self.shape() {
            WindowShape::SameDay => e - s,
            WindowShape::Overnight => MINUTES_PER_DAY - s + e,
        }
    }

    /// Live status of the window at time of day `now`
    pub fn status_at(&self, now: NaiveTime) -> FastingStatus {
        let (s, e, n) = (
            minute_of_day(self.start),
            minute_of_day(self.end),
            minute_of_day(now),
        );

        let position = match self.shape() {
            WindowShape::SameDay if s <= n && n < e => Some((e - n, n - s)),
            WindowShape::SameDay => None,
            // Evening segment, before midnight
            WindowShape::Overnight if n >= s => Some((MINUTES_PER_DAY - n + e, n - s)),
            // Morning segment, after midnight
            WindowShape::Overnight if n < e => Some((e - n, MINUTES_PER_DAY - s + n)),
            WindowShape::Overnight => None,
        };

        match position {
            Some((remaining, elapsed)) => {
                let progress = elapsed as f64 / self.length_minutes() as f64 * 100.0;
                FastingStatus {
                    is_fasting: true,
                    time_remaining_minutes: remaining.max(0) as u32,
                    progress_percent: progress.clamp(0.0, 100.0),
                }
            }
            None => FastingStatus::idle(),
        }
    }
}

/// Live status of a fast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastingStatus {
    pub is_fasting: bool,
    pub time_remaining_minutes: u32,
    pub progress_percent: f64,
}

impl FastingStatus {
    /// Status when no fast is in progress
    pub fn idle() -> Self {
        Self {
            is_fasting: false,
            time_remaining_minutes: 0,
            progress_percent: 0.0,
        }
    }
}

/// Fasting status at `now` for an optionally scheduled window
pub fn fasting_status(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    now: NaiveTime,
) -> FastingStatus {
    match (start, end) {
        (Some(start), Some(end)) => FastingWindow::new(start, end).status_at(now),
        _ => FastingStatus::idle(),
    }
}

/// Fasting status from stored time strings
///
/// Missing or blank strings give the idle status; malformed ones are an error.
pub fn fasting_status_from_strings(
    start: Option<&str>,
    end: Option<&str>,
    now: NaiveTime,
) -> CalcResult<FastingStatus> {
    let start = start.map(parse_time_of_day).transpose()?.flatten();
    let end = end.map(parse_time_of_day).transpose()?.flatten();
    Ok(fasting_status(start, end, now))
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour() * 60 + time.minute())
}
