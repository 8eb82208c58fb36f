//! Clock-string conversions.
//!
//! The planner stores task times as 12-hour clock strings (`"7:00 PM"`), while
//! the regression target is minutes since midnight. Parsing is strict:
//! hour 1-12, minute 0-59, case-insensitive meridiem, with the space before
//! the meridiem optional (both `"7:00PM"` and `"7:00 pm"` are accepted).

use chrono::{NaiveTime, Timelike};

use crate::error::{SchedulerError, SchedulerResult};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Parse a 12-hour clock string into minutes since midnight in `[0, 1440)`.
///
/// # Errors
///
/// Returns [`SchedulerError::TimeParse`] for anything that does not match
/// `H:MM AM|PM`.
pub fn minutes_from_midnight(value: &str) -> SchedulerResult<u32> {
    let time = NaiveTime::parse_from_str(value.trim(), "%I:%M %p").map_err(|_| {
        SchedulerError::TimeParse {
            value: value.to_string(),
        }
    })?;
    Ok(time.hour() * 60 + time.minute())
}

/// Format a (possibly fractional) minute count as a 12-hour clock string.
///
/// The value is rounded to the nearest minute and wrapped into a single day,
/// so `clock_string(m)` round-trips through [`minutes_from_midnight`] for any
/// finite input. Hours 0 and 12 both display as `12`; the minute is
/// zero-padded.
pub fn clock_string(minutes: f64) -> String {
    let total = (minutes.round() as i64).rem_euclid(i64::from(MINUTES_PER_DAY));
    let hour = total / 60;
    let minute = total % 60;
    let display_hour = if hour % 12 == 0 { 12 } else { hour % 12 };
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    format!("{display_hour}:{minute:02} {meridiem}")
}

/// Coarse hour-of-day bucket (0-23) for a minute count.
pub fn hour_bucket(minutes: u32) -> u32 {
    (minutes % MINUTES_PER_DAY) / 60
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_reference_times() {
        assert_eq!(minutes_from_midnight("7:00PM").unwrap(), 1140);
        assert_eq!(minutes_from_midnight("12:00AM").unwrap(), 0);
        assert_eq!(minutes_from_midnight("12:30PM").unwrap(), 750);
    }

    #[test]
    fn accepts_spacing_padding_and_case_variants() {
        assert_eq!(minutes_from_midnight("7:00 PM").unwrap(), 1140);
        assert_eq!(minutes_from_midnight("07:00 am").unwrap(), 420);
        assert_eq!(minutes_from_midnight("  11:59 pm ").unwrap(), 1439);
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "7 PM", "7:00", "0:30 AM", "13:00 PM", "7:60 AM", "7:00 XM", "noon"] {
            let err = minutes_from_midnight(bad).unwrap_err();
            assert!(
                matches!(err, SchedulerError::TimeParse { .. }),
                "expected TimeParse for {bad:?}"
            );
        }
    }

    #[test]
    fn formats_reference_times() {
        assert_eq!(clock_string(0.0), "12:00 AM");
        assert_eq!(clock_string(1439.0), "11:59 PM");
        assert_eq!(clock_string(720.0), "12:00 PM");
        assert_eq!(clock_string(1140.0), "7:00 PM");
    }

    #[test]
    fn rounds_and_wraps() {
        assert_eq!(clock_string(749.6), "12:30 PM");
        assert_eq!(clock_string(1439.7), "12:00 AM");
        assert_eq!(clock_string(-1.0), "11:59 PM");
    }

    #[test]
    fn round_trips_every_minute_of_the_day() {
        for m in 0..MINUTES_PER_DAY {
            let formatted = clock_string(f64::from(m));
            assert_eq!(minutes_from_midnight(&formatted).unwrap(), m, "at {formatted}");
        }
    }

    proptest! {
        #[test]
        fn round_trip_law(m in 0.0f64..10_000.0) {
            let expected = (m.round() as i64).rem_euclid(i64::from(MINUTES_PER_DAY)) as u32;
            prop_assert_eq!(minutes_from_midnight(&clock_string(m)).unwrap(), expected);
        }
    }
}
