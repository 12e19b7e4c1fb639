//! Error types for the calorie tracking core

use chrono::NaiveDate;
use thiserror::Error;

/// Invalid-input errors raised by the calculation core
///
/// Absent data (no entry logged, no weekly goal, no fast scheduled) is never
/// an error; those inputs resolve to zeroed derived values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid fasting duration: {0} hours (must be between 0 and 168)")]
    InvalidDuration(f64),

    #[error("{field} cannot be negative (got {value})")]
    NegativeCalories { field: &'static str, value: i64 },

    #[error("Week start {0} is not a Monday")]
    NonCanonicalWeekStart(NaiveDate),

    #[error("Weekly goal for week of {goal_week} does not cover week of {expected}")]
    GoalWeekMismatch {
        goal_week: NaiveDate,
        expected: NaiveDate,
    },
}

impl CalcError {
    /// Name of the input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            CalcError::InvalidTime(_) => "fast_time",
            CalcError::InvalidDuration(_) => "fasting_hours",
            CalcError::NegativeCalories { field, .. } => field,
            CalcError::NonCanonicalWeekStart(_) | CalcError::GoalWeekMismatch { .. } => {
                "week_start"
            }
        }
    }
}

/// Result alias for core calculations
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CalcError::InvalidTime("25:99".to_string());
        assert_eq!(err.to_string(), "Invalid time of day: \"25:99\" (expected HH:MM)");

        let err = CalcError::NegativeCalories {
            field: "calories_consumed",
            value: -5,
        };
        assert_eq!(err.to_string(), "calories_consumed cannot be negative (got -5)");
        assert_eq!(err.field(), "calories_consumed");
    }
}
