//! Calendar-week resolution
//!
//! Weeks start on Monday. All functions work on local calendar days
//! (`NaiveDate`), so "today" comparisons ignore the time of day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Number of days in a week
pub const DAYS_PER_WEEK: usize = 7;

/// Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Duration::days(i64::from(days_from_monday))
}

/// Sunday that closes the week containing `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// The seven dates of the week containing `date`, Monday first
pub fn week_dates(date: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    let start = week_start(date);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// Whether `date` is a canonical week key
pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Whether two dates fall in the same Monday-anchored week
pub fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    week_start(a) == week_start(b)
}

/// Count of days in the week of `date` that are today or later
///
/// Returns 0 once `today` has moved past the end of that week, and 7 for
/// a week that has not started yet.
pub fn remaining_days_in_week(date: NaiveDate, today: NaiveDate) -> u32 {
    if today > week_end(date) {
        return 0;
    }

    week_dates(date).iter().filter(|day| **day >= today).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 3, 11), date(2024, 3, 11))] // Monday maps to itself
    #[case(date(2024, 3, 13), date(2024, 3, 11))] // Wednesday
    #[case(date(2024, 3, 17), date(2024, 3, 11))] // Sunday belongs to the previous Monday
    #[case(date(2024, 1, 3), date(2024, 1, 1))]
    #[case(date(2023, 1, 1), date(2022, 12, 26))] // crosses a year boundary
    #[case(date(2024, 3, 1), date(2024, 2, 26))] // crosses a leap-day month boundary
    fn test_week_start(#[case] input: NaiveDate, #[case] expected: NaiveDate) {
        assert_eq!(week_start(input), expected);
    }

    #[test]
    fn test_week_end_is_sunday() {
        assert_eq!(week_end(date(2024, 3, 13)), date(2024, 3, 17));
        assert_eq!(week_end(date(2024, 3, 17)), date(2024, 3, 17));
        assert_eq!(week_end(date(2024, 12, 30)), date(2025, 1, 5));
    }

    #[test]
    fn test_week_dates() {
        let dates = week_dates(date(2024, 2, 28));
        assert_eq!(dates[0], date(2024, 2, 26));
        assert_eq!(dates[3], date(2024, 2, 29));
        assert_eq!(dates[6], date(2024, 3, 3));
    }

    #[rstest]
    #[case(date(2024, 3, 11), 7)] // Monday
    #[case(date(2024, 3, 13), 5)] // Wednesday
    #[case(date(2024, 3, 17), 1)] // Sunday
    fn test_remaining_days_in_current_week(#[case] today: NaiveDate, #[case] expected: u32) {
        assert_eq!(remaining_days_in_week(today, today), expected);
    }

    #[test]
    fn test_remaining_days_for_other_weeks() {
        let today = date(2024, 3, 13);
        // Past week is fully elapsed
        assert_eq!(remaining_days_in_week(date(2024, 3, 5), today), 0);
        // Next week has not started
        assert_eq!(remaining_days_in_week(date(2024, 3, 20), today), 7);
    }

    #[test]
    fn test_same_week() {
        assert!(same_week(date(2024, 3, 11), date(2024, 3, 17)));
        assert!(!same_week(date(2024, 3, 17), date(2024, 3, 18)));
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        // 1970-01-01 through roughly 2100
        (0i64..47_500).prop_map(|offset| date(1970, 1, 1) + Duration::days(offset))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_week_start_is_monday_on_or_before(d in any_date()) {
            let start = week_start(d);
            prop_assert_eq!(start.weekday(), Weekday::Mon);
            prop_assert!(start <= d);
            prop_assert!((d - start).num_days() < 7);
        }

        #[test]
        fn prop_week_start_is_idempotent(d in any_date()) {
            prop_assert_eq!(week_start(week_start(d)), week_start(d));
        }

        #[test]
        fn prop_week_end_is_sunday_six_days_later(d in any_date()) {
            let end = week_end(d);
            prop_assert_eq!(end.weekday(), Weekday::Sun);
            prop_assert_eq!((end - week_start(d)).num_days(), 6);
        }

        #[test]
        fn prop_week_dates_are_contiguous(d in any_date()) {
            let dates = week_dates(d);
            prop_assert_eq!(dates.len(), 7);
            prop_assert_eq!(dates[0], week_start(d));
            for pair in dates.windows(2) {
                prop_assert_eq!((pair[1] - pair[0]).num_days(), 1);
            }
            prop_assert!(dates.contains(&d));
        }

        #[test]
        fn prop_remaining_days_bounded(d in any_date(), shift in -14i64..14) {
            let today = d + Duration::days(shift);
            let remaining = remaining_days_in_week(d, today);
            prop_assert!(remaining <= 7);
            if same_week(d, today) {
                prop_assert!(remaining >= 1);
            }
        }
    }
}
