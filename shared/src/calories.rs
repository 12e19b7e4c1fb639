//! Calorie status calculations
//!
//! Turns raw consumption and target figures into display-ready statistics,
//! per day and aggregated per calendar week.
//!
//! All functions are pure: the caller supplies the records it fetched and
//! the calendar day it considers "today".

use crate::errors::{CalcError, CalcResult};
use crate::models::{DailyRecord, WeeklyGoal};
use crate::week::{is_week_start, remaining_days_in_week, week_dates, week_start};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily target used when neither the entry nor a weekly goal provides one
pub const DEFAULT_DAILY_TARGET: i32 = 2000;

// ============================================================================
// Policy
// ============================================================================

/// Tunable thresholds used by the status heuristics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaloriePolicy {
    /// Multiplier applied to expected consumption before flagging off-track
    pub on_track_tolerance: f64,
    /// Progress percentage from which a day counts as on target
    pub on_target_band: f64,
    /// Progress percentage from which a day counts as approaching target
    pub approaching_band: f64,
    /// Relative distance from target still counted as an accurate day
    pub daily_accuracy_tolerance: f64,
}

impl Default for CaloriePolicy {
    fn default() -> Self {
        Self {
            on_track_tolerance: 1.10,
            on_target_band: 90.0,
            approaching_band: 70.0,
            daily_accuracy_tolerance: 0.10,
        }
    }
}

/// Coarse classification of a progress value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Over,
    OnTarget,
    Approaching,
    Under,
}

/// Classify a progress percentage against the policy bands
pub fn progress_band(progress: f64, is_over_target: bool, policy: &CaloriePolicy) -> ProgressBand {
    if is_over_target {
        ProgressBand::Over
    } else if progress >= policy.on_target_band {
        ProgressBand::OnTarget
    } else if progress >= policy.approaching_band {
        ProgressBand::Approaching
    } else {
        ProgressBand::Under
    }
}

// ============================================================================
// Daily status
// ============================================================================

/// Derived status for a single day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyStatus {
    pub consumed: i32,
    pub target: i32,
    /// Calories left before reaching target, floored at zero
    pub remaining: i32,
    pub is_over_target: bool,
    /// Percentage of target consumed, capped at 100
    pub progress: f64,
}

/// Compute the status of one day
///
/// A missing entry means nothing has been logged yet and counts as zero
/// consumed.
pub fn daily_status(entry: Option<&DailyRecord>, target_calories: i32) -> CalcResult<DailyStatus> {
    ensure_non_negative("target_calories", i64::from(target_calories))?;
    let consumed = match entry {
        Some(record) => {
            ensure_non_negative("calories_consumed", i64::from(record.calories_consumed))?;
            record.calories_consumed
        }
        None => 0,
    };

    Ok(DailyStatus {
        consumed,
        target: target_calories,
        remaining: (target_calories - consumed).max(0),
        is_over_target: consumed > target_calories,
        progress: capped_percent(i64::from(consumed), i64::from(target_calories)),
    })
}

/// Pick the target for a day
///
/// Uses the entry's own target when set, otherwise an even seventh of the
/// weekly goal, otherwise `fallback`.
pub fn default_daily_target(
    entry: Option<&DailyRecord>,
    goal: Option<&WeeklyGoal>,
    fallback: i32,
) -> i32 {
    if let Some(target) = entry.map(|e| e.target_calories).filter(|t| *t > 0) {
        return target;
    }

    match goal {
        Some(goal) => (f64::from(goal.total_target_calories) / 7.0).round() as i32,
        None => fallback,
    }
}

// ============================================================================
// Weekly status
// ============================================================================

/// Derived status for a calendar week
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatus {
    pub total_consumed: i64,
    pub total_target: i64,
    /// Calories left in the weekly budget, floored at zero
    pub remaining: i64,
    /// Today plus the days after it within the week
    pub remaining_days: u32,
    /// Even split of `remaining` over `remaining_days`
    pub daily_recommendation: i64,
    pub is_on_track: bool,
    /// Percentage of the weekly target consumed, capped at 100
    pub week_progress: f64,
}

/// Compute the weekly status with the default policy
///
/// `week_of` is any date in the week to report on; `today` is the caller's
/// current calendar day.
pub fn weekly_status(
    records: &[DailyRecord],
    goal: Option<&WeeklyGoal>,
    week_of: NaiveDate,
    today: NaiveDate,
) -> CalcResult<WeeklyStatus> {
    weekly_status_with_policy(records, goal, week_of, today, &CaloriePolicy::default())
}

/// Compute the weekly status with an explicit policy
pub fn weekly_status_with_policy(
    records: &[DailyRecord],
    goal: Option<&WeeklyGoal>,
    week_of: NaiveDate,
    today: NaiveDate,
    policy: &CaloriePolicy,
) -> CalcResult<WeeklyStatus> {
    let total_target = match goal {
        Some(goal) => {
            check_goal_week(goal, week_of)?;
            ensure_non_negative("total_target_calories", i64::from(goal.total_target_calories))?;
            i64::from(goal.total_target_calories)
        }
        None => 0,
    };

    let members = week_members(records, week_of)?;

    let total_consumed: i64 = members
        .iter()
        .map(|r| i64::from(r.calories_consumed))
        .sum();
    let remaining = (total_target - total_consumed).max(0);
    let remaining_days = remaining_days_in_week(week_of, today);

    let daily_recommendation = if remaining_days == 0 {
        0
    } else {
        (remaining as f64 / f64::from(remaining_days)).round() as i64
    };

    // Entries dated today count as completed
    let completed_days = members.iter().filter(|r| r.date <= today).count();
    let expected_consumed = if completed_days == 0 {
        0.0
    } else {
        (total_target as f64 / 7.0) * completed_days as f64
    };
    let is_on_track = total_consumed as f64 <= expected_consumed * policy.on_track_tolerance;

    Ok(WeeklyStatus {
        total_consumed,
        total_target,
        remaining,
        remaining_days,
        daily_recommendation,
        is_on_track,
        week_progress: capped_percent(total_consumed, total_target),
    })
}

/// One row of the weekly overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBreakdown {
    pub date: NaiveDate,
    pub logged: bool,
    pub is_today: bool,
    pub is_future: bool,
    pub status: DailyStatus,
    pub band: ProgressBand,
}

/// Per-day statuses for the seven days of the week containing `week_of`
pub fn week_breakdown(
    records: &[DailyRecord],
    goal: Option<&WeeklyGoal>,
    week_of: NaiveDate,
    today: NaiveDate,
    fallback_target: i32,
    policy: &CaloriePolicy,
) -> CalcResult<Vec<DayBreakdown>> {
    if let Some(goal) = goal {
        check_goal_week(goal, week_of)?;
    }

    week_dates(week_of)
        .into_iter()
        .map(|date| {
            let entry = records.iter().find(|r| r.date == date);
            let target = default_daily_target(entry, goal, fallback_target);
            let status = daily_status(entry, target)?;
            Ok(DayBreakdown {
                date,
                logged: entry.is_some(),
                is_today: date == today,
                is_future: date > today,
                band: progress_band(status.progress, status.is_over_target, policy),
                status,
            })
        })
        .collect()
}

// ============================================================================
// Range summary
// ============================================================================

/// Aggregate statistics over an arbitrary set of logged days
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeSummary {
    pub days_logged: u32,
    pub total_consumed: i64,
    pub total_target: i64,
    /// Mean consumption per logged day, rounded
    pub average_daily: i64,
    /// Days whose intake landed within the accuracy tolerance of target
    pub days_on_target: u32,
    /// `days_on_target` as a rounded percentage of `days_logged`
    pub accuracy_percent: u32,
}

/// Summarise a set of daily records
pub fn range_summary(records: &[DailyRecord], policy: &CaloriePolicy) -> CalcResult<RangeSummary> {
    if records.is_empty() {
        return Ok(RangeSummary::default());
    }

    let mut summary = RangeSummary::default();
    for record in records {
        ensure_non_negative("calories_consumed", i64::from(record.calories_consumed))?;
        ensure_non_negative("target_calories", i64::from(record.target_calories))?;

        let consumed = f64::from(record.calories_consumed);
        let target = f64::from(record.target_calories);

        summary.days_logged += 1;
        summary.total_consumed += i64::from(record.calories_consumed);
        summary.total_target += i64::from(record.target_calories);
        if (consumed - target).abs() <= target * policy.daily_accuracy_tolerance {
            summary.days_on_target += 1;
        }
    }

    let days = f64::from(summary.days_logged);
    summary.average_daily = (summary.total_consumed as f64 / days).round() as i64;
    summary.accuracy_percent = (f64::from(summary.days_on_target) / days * 100.0).round() as u32;

    Ok(summary)
}

// ============================================================================
// Helpers
// ============================================================================

/// Records that belong to the week of `week_of`
///
/// Membership is decided by re-deriving each record's week start rather than
/// by a raw date-range comparison.
fn week_members(records: &[DailyRecord], week_of: NaiveDate) -> CalcResult<Vec<&DailyRecord>> {
    let anchor = week_start(week_of);
    let mut members = Vec::new();
    for record in records.iter().filter(|r| week_start(r.date) == anchor) {
        ensure_non_negative("calories_consumed", i64::from(record.calories_consumed))?;
        members.push(record);
    }
    Ok(members)
}

fn check_goal_week(goal: &WeeklyGoal, week_of: NaiveDate) -> CalcResult<()> {
    if !is_week_start(goal.week_start) {
        return Err(CalcError::NonCanonicalWeekStart(goal.week_start));
    }
    let expected = week_start(week_of);
    if goal.week_start != expected {
        return Err(CalcError::GoalWeekMismatch {
            goal_week: goal.week_start,
            expected,
        });
    }
    Ok(())
}

fn ensure_non_negative(field: &'static str, value: i64) -> CalcResult<()> {
    if value < 0 {
        return Err(CalcError::NegativeCalories { field, value });
    }
    Ok(())
}

/// `100 * part / whole`, zero for a non-positive whole, capped at 100
fn capped_percent(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Monday 2024-03-11 .. Sunday 2024-03-17
    fn monday() -> NaiveDate {
        date(2024, 3, 11)
    }

    fn full_week(consumed: i32) -> Vec<DailyRecord> {
        (0..7)
            .map(|i| DailyRecord::new(monday() + Duration::days(i), consumed, 2000))
            .collect()
    }

    // =========================================================================
    // Daily status
    // =========================================================================

    #[test]
    fn test_daily_status_without_entry() {
        let status = daily_status(None, 2000).unwrap();
        assert_eq!(status.consumed, 0);
        assert_eq!(status.target, 2000);
        assert_eq!(status.remaining, 2000);
        assert!(!status.is_over_target);
        assert_eq!(status.progress, 0.0);
    }

    #[test]
    fn test_daily_status_over_target() {
        let entry = DailyRecord::new(monday(), 2500, 2000);
        let status = daily_status(Some(&entry), 2000).unwrap();
        assert_eq!(status.consumed, 2500);
        assert_eq!(status.remaining, 0);
        assert!(status.is_over_target);
        assert_eq!(status.progress, 100.0);
    }

    #[test]
    fn test_daily_status_half_way() {
        let entry = DailyRecord::new(monday(), 1000, 2000);
        let status = daily_status(Some(&entry), 2000).unwrap();
        assert_eq!(status.progress, 50.0);
        assert_eq!(status.remaining, 1000);
    }

    #[test]
    fn test_daily_status_zero_target() {
        let entry = DailyRecord::new(monday(), 300, 0);
        let status = daily_status(Some(&entry), 0).unwrap();
        assert_eq!(status.progress, 0.0);
        assert!(status.is_over_target);
        assert_eq!(status.remaining, 0);
    }

    #[test]
    fn test_daily_status_rejects_negative_values() {
        let entry = DailyRecord::new(monday(), -1, 2000);
        assert_eq!(
            daily_status(Some(&entry), 2000),
            Err(CalcError::NegativeCalories {
                field: "calories_consumed",
                value: -1
            })
        );
        assert!(daily_status(None, -10).is_err());
    }

    #[rstest]
    #[case(105.0, true, ProgressBand::Over)]
    #[case(95.0, false, ProgressBand::OnTarget)]
    #[case(90.0, false, ProgressBand::OnTarget)]
    #[case(75.0, false, ProgressBand::Approaching)]
    #[case(10.0, false, ProgressBand::Under)]
    fn test_progress_band(
        #[case] progress: f64,
        #[case] over: bool,
        #[case] expected: ProgressBand,
    ) {
        let band = progress_band(progress, over, &CaloriePolicy::default());
        assert_eq!(band, expected);
    }

    #[test]
    fn test_default_daily_target() {
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);
        let entry = DailyRecord::new(monday(), 500, 1800);
        let unset = DailyRecord::new(monday(), 500, 0);

        assert_eq!(default_daily_target(Some(&entry), Some(&goal), 2000), 1800);
        assert_eq!(default_daily_target(Some(&unset), Some(&goal), 2000), 2000);
        let lean = WeeklyGoal::for_week_of(monday(), 12_000);
        assert_eq!(default_daily_target(None, Some(&lean), 2000), 1714);
        assert_eq!(default_daily_target(None, None, DEFAULT_DAILY_TARGET), 2000);
    }

    // =========================================================================
    // Weekly status
    // =========================================================================

    #[test]
    fn test_weekly_status_empty() {
        let status = weekly_status(&[], None, date(2024, 3, 13), date(2024, 3, 13)).unwrap();
        assert_eq!(status.total_consumed, 0);
        assert_eq!(status.total_target, 0);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.daily_recommendation, 0);
        assert_eq!(status.week_progress, 0.0);
    }

    #[test]
    fn test_weekly_status_first_open_on_wednesday() {
        let wednesday = date(2024, 3, 13);
        let status = weekly_status(&[], None, wednesday, wednesday).unwrap();
        assert_eq!(status.remaining_days, 5);
        assert_eq!(status.total_consumed, 0);
        assert_eq!(status.total_target, 0);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.daily_recommendation, 0);
        assert_eq!(status.week_progress, 0.0);
        assert!(status.is_on_track);
    }

    #[test]
    fn test_weekly_status_full_week_on_target() {
        let records = full_week(2000);
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);
        let sunday = date(2024, 3, 17);

        let status = weekly_status(&records, Some(&goal), sunday, sunday).unwrap();
        assert_eq!(status.total_consumed, 14_000);
        assert!(status.is_on_track);
        assert_eq!(status.week_progress, 100.0);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.remaining_days, 1);
        assert_eq!(status.daily_recommendation, 0);
    }

    #[test]
    fn test_weekly_status_ignores_other_weeks() {
        let mut records = full_week(1000);
        records.push(DailyRecord::new(date(2024, 3, 10), 9000, 2000)); // previous Sunday
        records.push(DailyRecord::new(date(2024, 3, 18), 9000, 2000)); // next Monday
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);

        let status = weekly_status(&records, Some(&goal), monday(), date(2024, 3, 17)).unwrap();
        assert_eq!(status.total_consumed, 7000);
        assert_eq!(status.remaining, 7000);
        assert_eq!(status.week_progress, 50.0);
    }

    #[test]
    fn test_weekly_status_daily_recommendation() {
        let wednesday = date(2024, 3, 13);
        let records = vec![
            DailyRecord::new(monday(), 2100, 2000),
            DailyRecord::new(date(2024, 3, 12), 1900, 2000),
        ];
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);

        let status = weekly_status(&records, Some(&goal), wednesday, wednesday).unwrap();
        assert_eq!(status.remaining, 10_000);
        assert_eq!(status.remaining_days, 5);
        assert_eq!(status.daily_recommendation, 2000);
        assert!(status.is_on_track);
    }

    #[test]
    fn test_weekly_status_off_track_beyond_tolerance() {
        let tuesday = date(2024, 3, 12);
        let records = vec![
            DailyRecord::new(monday(), 2600, 2000),
            DailyRecord::new(tuesday, 2600, 2000),
        ];
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);

        // Expected 4000, tolerance allows 4400, consumed 5200
        let status = weekly_status(&records, Some(&goal), tuesday, tuesday).unwrap();
        assert!(!status.is_on_track);

        let lenient = CaloriePolicy {
            on_track_tolerance: 1.5,
            ..CaloriePolicy::default()
        };
        let status =
            weekly_status_with_policy(&records, Some(&goal), tuesday, tuesday, &lenient).unwrap();
        assert!(status.is_on_track);
    }

    #[test]
    fn test_weekly_status_future_entries_not_completed() {
        let monday_today = monday();
        // A pre-logged entry for Friday does not count as a completed day
        let records = vec![DailyRecord::new(date(2024, 3, 15), 2000, 2000)];
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);

        let status = weekly_status(&records, Some(&goal), monday_today, monday_today).unwrap();
        assert!(!status.is_on_track);
        assert_eq!(status.remaining_days, 7);
    }

    #[test]
    fn test_weekly_status_past_week_has_no_remaining_days() {
        let records = full_week(1500);
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);

        let status = weekly_status(&records, Some(&goal), monday(), date(2024, 4, 1)).unwrap();
        assert_eq!(status.remaining_days, 0);
        assert_eq!(status.daily_recommendation, 0);
        assert_eq!(status.remaining, 3500);
    }

    #[test]
    fn test_weekly_status_rejects_foreign_goal() {
        let tuesday_key = WeeklyGoal {
            week_start: date(2024, 3, 12),
            total_target_calories: 14_000,
        };
        assert_eq!(
            weekly_status(&[], Some(&tuesday_key), monday(), monday()),
            Err(CalcError::NonCanonicalWeekStart(date(2024, 3, 12)))
        );

        let other_week = WeeklyGoal::for_week_of(date(2024, 3, 20), 14_000);
        assert!(matches!(
            weekly_status(&[], Some(&other_week), monday(), monday()),
            Err(CalcError::GoalWeekMismatch { .. })
        ));
    }

    #[test]
    fn test_week_breakdown() {
        let records = vec![
            DailyRecord::new(monday(), 1900, 2000),
            DailyRecord::new(date(2024, 3, 12), 2300, 2000),
        ];
        let goal = WeeklyGoal::for_week_of(monday(), 14_000);
        let wednesday = date(2024, 3, 13);

        let days = week_breakdown(
            &records,
            Some(&goal),
            wednesday,
            wednesday,
            DEFAULT_DAILY_TARGET,
            &CaloriePolicy::default(),
        )
        .unwrap();

        assert_eq!(days.len(), 7);
        assert!(days[0].logged);
        assert_eq!(days[0].band, ProgressBand::OnTarget);
        assert_eq!(days[1].band, ProgressBand::Over);
        assert!(days[2].is_today && !days[2].logged);
        assert_eq!(days[2].status.target, 2000);
        assert!(days[6].is_future);
    }

    // =========================================================================
    // Range summary
    // =========================================================================

    #[test]
    fn test_range_summary() {
        let records = vec![
            DailyRecord::new(monday(), 2000, 2000),
            DailyRecord::new(date(2024, 3, 12), 2150, 2000),
            DailyRecord::new(date(2024, 3, 13), 1500, 2000),
        ];
        let summary = range_summary(&records, &CaloriePolicy::default()).unwrap();
        assert_eq!(summary.days_logged, 3);
        assert_eq!(summary.total_consumed, 5650);
        assert_eq!(summary.total_target, 6000);
        assert_eq!(summary.average_daily, 1883);
        assert_eq!(summary.days_on_target, 2);
        assert_eq!(summary.accuracy_percent, 67);
    }

    #[test]
    fn test_range_summary_empty() {
        let summary = range_summary(&[], &CaloriePolicy::default()).unwrap();
        assert_eq!(summary, RangeSummary::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_daily_status_bounds(consumed in 0i32..20_000, target in 0i32..10_000) {
            let entry = DailyRecord::new(monday(), consumed, target);
            let status = daily_status(Some(&entry), target).unwrap();
            prop_assert!(status.progress >= 0.0 && status.progress <= 100.0);
            prop_assert!(status.remaining >= 0);
            prop_assert_eq!(status.is_over_target, consumed > target);
            prop_assert_eq!(status.remaining, (target - consumed).max(0));
        }

        #[test]
        fn prop_weekly_status_bounds(
            consumed in prop::collection::vec(0i32..5_000, 0..7),
            target in 1i32..50_000,
            today_offset in 0i64..7
        ) {
            let records: Vec<DailyRecord> = consumed
                .iter()
                .enumerate()
                .map(|(i, c)| DailyRecord::new(monday() + Duration::days(i as i64), *c, 2000))
                .collect();
            let goal = WeeklyGoal::for_week_of(monday(), target);
            let today = monday() + Duration::days(today_offset);

            let status = weekly_status(&records, Some(&goal), today, today).unwrap();
            prop_assert!(status.week_progress >= 0.0 && status.week_progress <= 100.0);
            prop_assert!(status.remaining >= 0);
            prop_assert_eq!(status.remaining_days as i64, 7 - today_offset);
            let expected: i64 = consumed.iter().map(|c| i64::from(*c)).sum();
            prop_assert_eq!(status.total_consumed, expected);
        }
    }
}
