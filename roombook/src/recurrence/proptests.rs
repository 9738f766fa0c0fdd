//! Property-based tests for recurrence expansion.

use super::{RecurrenceExpander, RecurrenceRequest, RecurrenceType};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;

// Strategy for a start instant on a whole minute in 2024
fn start_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..365, 0u32..12, 0u32..60).prop_map(|(day, hour, minute)| {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + TimeDelta::days(day);
        base.and_hms_opt(hour, minute, 0).unwrap()
    })
}

fn request(kind: &str, start: NaiveDateTime, end: NaiveDateTime) -> RecurrenceRequest {
    RecurrenceRequest::new("R1", "alice")
        .with_start(
            start.format("%Y-%m-%d").to_string(),
            start.format("%H:%M").to_string(),
        )
        .with_end(
            end.format("%Y-%m-%d").to_string(),
            end.format("%H:%M").to_string(),
        )
        .with_recurrence_type(kind)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // DAILY yields exactly one occurrence per calendar day, in order
    #[test]
    fn daily_count_matches_day_difference(
        start in start_strategy(),
        days in 0i64..60,
        extra_minutes in 1i64..(11 * 60),
    ) {
        // End time of day stays after the start time of day.
        let end = start + TimeDelta::days(days) + TimeDelta::minutes(extra_minutes);
        prop_assume!(end.date() == (start + TimeDelta::days(days)).date());

        let out = RecurrenceExpander::new().expand(&request("DAILY", start, end)).unwrap();
        prop_assert_eq!(out.len() as i64, days);

        for (i, booking) in out.iter().enumerate() {
            prop_assert_eq!(booking.start_time(), start + TimeDelta::days(i as i64));
            prop_assert!(booking.start_time() < booking.end_time());
            prop_assert_eq!(booking.end_time().time(), end.time());
            prop_assert_eq!(booking.recurrence_type(), RecurrenceType::Daily);
        }
    }

    // WEEKLY yields one occurrence per whole week, seven days apart
    #[test]
    fn weekly_count_matches_week_difference(
        start in start_strategy(),
        days in 0i64..120,
        extra_minutes in 1i64..(11 * 60),
    ) {
        let end = start + TimeDelta::days(days) + TimeDelta::minutes(extra_minutes);
        prop_assume!(end.date() == (start + TimeDelta::days(days)).date());

        let out = RecurrenceExpander::new().expand(&request("WEEKLY", start, end)).unwrap();
        prop_assert_eq!(out.len() as i64, days / 7);

        for pair in out.windows(2) {
            prop_assert_eq!(pair[1].start_time() - pair[0].start_time(), TimeDelta::weeks(1));
        }
        prop_assert!(out.iter().all(|b| !b.weekdays().is_empty()));
    }

    // SINGLE always echoes the requested range
    #[test]
    fn single_is_identity(start in start_strategy(), minutes in 1i64..(3 * 24 * 60)) {
        let end = start + TimeDelta::minutes(minutes);
        let out = RecurrenceExpander::new().expand(&request("SINGLE", start, end)).unwrap();
        prop_assert_eq!(out.len(), 1);
        prop_assert_eq!(out[0].start_time(), start);
        prop_assert_eq!(out[0].end_time(), end);
    }

    // Expansion is deterministic
    #[test]
    fn expansion_is_deterministic(start in start_strategy(), days in 0i64..30) {
        let end = start + TimeDelta::days(days) + TimeDelta::minutes(30);
        prop_assume!(end.date() == (start + TimeDelta::days(days)).date());
        let req = request("DAILY", start, end);
        let expander = RecurrenceExpander::new();
        prop_assert_eq!(expander.expand(&req).unwrap(), expander.expand(&req).unwrap());
    }
}
