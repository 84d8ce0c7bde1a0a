//! All-day event classification.
//!
//! Some calendar sources mark all-day events with `VALUE=DATE`, others
//! export them as timed spans of exactly 24h (or a multiple). Both count.

use crate::types::{Event, SECS_PER_DAY};

/// True if the event is explicitly all-day or spans a positive whole number of days.
pub fn is_all_day(event: &Event) -> bool {
    if event.is_all_day {
        return true;
    }

    match event.duration() {
        Some(duration) => {
            let secs = duration.num_seconds();
            secs > 0 && secs % SECS_PER_DAY == 0
        }
        None => false,
    }
}

/// Number of days an all-day event covers.
///
/// `floor(hours / 24)`, with a floor of one day when the span is missing or
/// shorter than a day.
pub fn day_span(event: &Event) -> i64 {
    event
        .duration()
        .map(|d| d.num_seconds() / SECS_PER_DAY)
        .filter(|&days| days > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn spanning(duration: Option<Duration>, marked: bool) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        Event {
            start: Some(start),
            end: duration.map(|d| start + d),
            is_all_day: marked,
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_day_is_all_day() {
        assert!(is_all_day(&spanning(Some(Duration::hours(24)), false)));
        assert!(is_all_day(&spanning(Some(Duration::hours(72)), false)));
    }

    #[test]
    fn test_non_multiple_is_timed() {
        assert!(!is_all_day(&spanning(Some(Duration::hours(25)), false)));
        assert!(!is_all_day(&spanning(Some(Duration::hours(23)), false)));
        assert!(!is_all_day(&spanning(Some(Duration::hours(24) + Duration::minutes(30)), false)));
        assert!(!is_all_day(&spanning(Some(Duration::zero()), false)));
        assert!(!is_all_day(&spanning(Some(Duration::hours(-24)), false)));
    }

    #[test]
    fn test_marker_wins() {
        assert!(is_all_day(&spanning(None, true)));
        assert!(is_all_day(&spanning(Some(Duration::hours(1)), true)));
    }

    #[test]
    fn test_missing_end_is_timed() {
        assert!(!is_all_day(&spanning(None, false)));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let event = spanning(Some(Duration::hours(48)), false);
        let first = is_all_day(&event);
        assert_eq!(first, is_all_day(&event));
        assert_eq!(event, spanning(Some(Duration::hours(48)), false));
    }

    #[test]
    fn test_day_span() {
        assert_eq!(day_span(&spanning(Some(Duration::hours(24)), true)), 1);
        assert_eq!(day_span(&spanning(Some(Duration::hours(72)), true)), 3);
        assert_eq!(day_span(&spanning(Some(Duration::hours(30)), true)), 1);
        assert_eq!(day_span(&spanning(Some(Duration::zero()), true)), 1);
        assert_eq!(day_span(&spanning(None, true)), 1);
    }
}
