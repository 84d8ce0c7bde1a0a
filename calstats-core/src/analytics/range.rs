//! Date-range filtering.

use crate::config::DateRange;
use crate::types::Event;
use chrono::{DateTime, Days, NaiveTime, Utc};

impl DateRange {
    /// First instant of the range (start date, midnight).
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant after the range (end date + 1 day, midnight).
    pub fn end_instant_exclusive(&self) -> DateTime<Utc> {
        self.end
            .checked_add_days(Days::new(1))
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// True if `ts` falls on any day of the range.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start_instant() && ts < self.end_instant_exclusive()
    }
}

/// Keep events whose start falls within `range`; events without a start are dropped.
pub fn filter_by_range(events: &[Event], range: &DateRange) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.start.is_some_and(|start| range.contains(start)))
        .cloned()
        .collect()
}
