//! Per-title statistics and ranking views.
//!
//! Titles are grouped after trimming; events with an empty title are left
//! out of every per-title table. All tables come out sorted by title, and
//! every ranking view breaks ties by title ascending so output is fully
//! deterministic.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::all_day::{day_span, is_all_day};
use crate::types::{Event, TitleStats, SECS_PER_DAY};

/// Group events by trimmed title, skipping empty titles.
pub fn group_by_title(events: &[Event]) -> BTreeMap<&str, Vec<&Event>> {
    let mut grouped: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
    for event in events {
        let title = event.title();
        if !title.is_empty() {
            grouped.entry(title).or_default().push(event);
        }
    }
    grouped
}

/// Sum of positive timed durations, ignoring all-day events.
pub fn timed_duration_secs<'a, I>(events: I) -> i64
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| !is_all_day(event))
        .filter_map(Event::positive_duration_secs)
        .sum()
}

/// Timed view: every group, with count of all members and positive timed duration.
pub fn title_stats(grouped: &BTreeMap<&str, Vec<&Event>>) -> Vec<TitleStats> {
    grouped
        .iter()
        .map(|(title, events)| TitleStats {
            title: title.to_string(),
            count: events.len(),
            duration_secs: timed_duration_secs(events.iter().copied()),
        })
        .collect()
}

/// All-day view: groups with at least one all-day member.
///
/// `count` is the number of all-day members and `duration_secs` is their
/// total day-span in seconds.
pub fn all_day_stats(grouped: &BTreeMap<&str, Vec<&Event>>) -> Vec<TitleStats> {
    grouped
        .iter()
        .filter_map(|(title, events)| {
            let all_day: Vec<&&Event> = events.iter().filter(|e| is_all_day(e)).collect();
            if all_day.is_empty() {
                return None;
            }
            let total_days: i64 = all_day.iter().map(|e| day_span(e)).sum();
            Some(TitleStats {
                title: title.to_string(),
                count: all_day.len(),
                duration_secs: total_days * SECS_PER_DAY,
            })
        })
        .collect()
}

fn by_title(a: &TitleStats, b: &TitleStats) -> Ordering {
    a.title.cmp(&b.title)
}

/// Count descending, then title ascending.
pub fn rank_by_count(stats: &[TitleStats]) -> Vec<TitleStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| by_title(a, b)));
    ranked
}

/// Duration descending, then title ascending.
pub fn rank_by_duration(stats: &[TitleStats]) -> Vec<TitleStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| {
        b.duration_secs
            .cmp(&a.duration_secs)
            .then_with(|| by_title(a, b))
    });
    ranked
}

/// Total days descending, then title ascending (all-day view).
pub fn rank_by_days(stats: &[TitleStats]) -> Vec<TitleStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| b.days().cmp(&a.days()).then_with(|| by_title(a, b)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn event(title: &str, hours: Option<i64>, marked: bool) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        Event {
            summary: title.to_string(),
            start: Some(start),
            end: hours.map(|h| start + Duration::hours(h)),
            is_all_day: marked,
            ..Default::default()
        }
    }

    fn stats(title: &str, count: usize, duration_secs: i64) -> TitleStats {
        TitleStats {
            title: title.to_string(),
            count,
            duration_secs,
        }
    }

    #[test]
    fn test_group_trims_and_skips_empty() {
        let events = vec![
            event(" Standup ", Some(1), false),
            event("Standup", Some(1), false),
            event("   ", Some(1), false),
            event("", Some(1), false),
        ];
        let grouped = group_by_title(&events);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["Standup"].len(), 2);
    }

    #[test]
    fn test_title_stats_skips_non_positive_and_all_day() {
        let events = vec![
            event("Mixed", Some(2), false),
            event("Mixed", Some(0), false),
            event("Mixed", Some(-1), false),
            event("Mixed", Some(24), false),
            event("Mixed", None, false),
        ];
        let grouped = group_by_title(&events);
        let timed = title_stats(&grouped);
        assert_eq!(timed, vec![stats("Mixed", 5, 2 * 3600)]);
    }

    #[test]
    fn test_zero_duration_group() {
        let events = vec![event("Reminder", Some(0), false)];
        let grouped = group_by_title(&events);
        assert_eq!(title_stats(&grouped), vec![stats("Reminder", 1, 0)]);
        assert!(all_day_stats(&grouped).is_empty());
    }

    #[test]
    fn test_all_day_only_group() {
        let events = vec![event("Holiday", Some(24), true)];
        let grouped = group_by_title(&events);
        assert_eq!(title_stats(&grouped), vec![stats("Holiday", 1, 0)]);
        assert_eq!(all_day_stats(&grouped), vec![stats("Holiday", 1, SECS_PER_DAY)]);
    }

    #[test]
    fn test_all_day_stats_counts_only_all_day_members() {
        let events = vec![
            event("Offsite", Some(72), false),
            event("Offsite", None, true),
            event("Offsite", Some(3), false),
        ];
        let grouped = group_by_title(&events);
        let all_day = all_day_stats(&grouped);
        assert_eq!(all_day.len(), 1);
        assert_eq!(all_day[0].count, 2);
        assert_eq!(all_day[0].days(), 4);
    }

    #[test]
    fn test_rank_by_count_ties_by_title() {
        let input = vec![stats("b", 2, 0), stats("a", 2, 0), stats("c", 5, 0)];
        let titles: Vec<_> = rank_by_count(&input).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rank_by_duration_ties_by_title() {
        let input = vec![stats("zeta", 1, 60), stats("alpha", 9, 60), stats("mid", 1, 120)];
        let titles: Vec<_> = rank_by_duration(&input).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_rank_by_days_ties_by_title() {
        let input = vec![
            stats("Vacation", 1, 5 * SECS_PER_DAY),
            stats("Conference", 2, 2 * SECS_PER_DAY),
            stats("Bank holiday", 2, 2 * SECS_PER_DAY),
        ];
        let titles: Vec<_> = rank_by_days(&input).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Vacation", "Bank holiday", "Conference"]);
    }

    #[test]
    fn test_rankings_are_input_order_independent() {
        let mut input = vec![stats("a", 1, 10), stats("b", 1, 10), stats("c", 1, 10)];
        let expected = rank_by_count(&input);
        input.reverse();
        assert_eq!(rank_by_count(&input), expected);
        assert_eq!(rank_by_duration(&input), expected);
    }

    #[test]
    fn test_empty_inputs() {
        let grouped = group_by_title(&[]);
        assert!(title_stats(&grouped).is_empty());
        assert!(all_day_stats(&grouped).is_empty());
        assert!(rank_by_count(&[]).is_empty());
        let none: Vec<Event> = Vec::new();
        assert_eq!(timed_duration_secs(&none), 0);
    }
}
