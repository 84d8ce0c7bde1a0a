//! Hour-of-day and day-of-week activity.

use chrono::{Datelike, Timelike};

use super::all_day::is_all_day;
use crate::format::day_name;
use crate::types::{Event, WorkingHoursStats};

/// Number of peak hours reported.
pub const PEAK_HOUR_COUNT: usize = 3;

/// Accumulate timed events by start hour and weekday.
///
/// Uses the raw duration like the category totals. Events without a start
/// are skipped.
pub fn analyze_working_hours(events: &[Event]) -> WorkingHoursStats {
    let mut stats = WorkingHoursStats::default();

    for event in events.iter().filter(|e| !is_all_day(e)) {
        let Some(start) = event.start else {
            continue;
        };
        let duration = event.raw_duration_secs();

        *stats.hourly_distribution.entry(start.hour()).or_insert(0) += duration;
        *stats
            .daily_distribution
            .entry(day_name(start.weekday()).to_string())
            .or_insert(0) += duration;
        stats.total_working_secs += duration;
    }

    stats.peak_hours = peak_hours(&stats.hourly_distribution, PEAK_HOUR_COUNT);
    stats
}

/// Hours sorted by accumulated duration descending, then hour ascending.
pub fn peak_hours<'a, I>(hourly: I, limit: usize) -> Vec<u32>
where
    I: IntoIterator<Item = (&'a u32, &'a i64)>,
{
    let mut hours: Vec<(u32, i64)> = hourly.into_iter().map(|(&h, &d)| (h, d)).collect();
    hours.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    hours.into_iter().take(limit).map(|(hour, _)| hour).collect()
}
