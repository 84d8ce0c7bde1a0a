//! Category breakdown of timed events.

use super::all_day::is_all_day;
use crate::categorize::CategorizationRules;
use crate::types::{Event, EventCategoryStats, TimeBucket};

/// Bucket timed events by category and by coarse time bucket.
///
/// Durations are the raw `end - start` (zero when the end is missing), with
/// no positivity filter: a degenerate event still adds its zero or negative
/// span to the category total. Per-title rankings filter these out; category
/// totals keep them.
pub fn analyze_category_stats(events: &[Event], rules: &CategorizationRules) -> EventCategoryStats {
    let mut stats = EventCategoryStats::default();

    for event in events.iter().filter(|e| !is_all_day(e)) {
        let duration = event.raw_duration_secs();
        let title = event.summary.to_lowercase();

        let info = stats
            .categories
            .entry(rules.categorize_event(&title))
            .or_default();
        info.count += 1;
        info.duration_secs += duration;
        info.events.push(event.clone());

        match rules.time_bucket(&title) {
            TimeBucket::Meeting => stats.meeting_secs += duration,
            TimeBucket::Focus => stats.focus_secs += duration,
            TimeBucket::Learning => stats.learning_secs += duration,
            TimeBucket::Admin => stats.admin_secs += duration,
            TimeBucket::Other => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::OTHER;
    use chrono::{Duration, TimeZone, Utc};

    fn rules() -> CategorizationRules {
        CategorizationRules::from_toml(
            r#"
[categories.meeting]
keywords = ["meeting", "standup"]

[categories.focus]
keywords = ["focus"]

[event_categories.standup]
keywords = ["standup"]
category = "daily standups"
"#,
        )
        .unwrap()
    }

    fn event(title: &str, minutes: Option<i64>, marked: bool) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        Event {
            summary: title.to_string(),
            start: Some(start),
            end: minutes.map(|m| start + Duration::minutes(m)),
            is_all_day: marked,
            ..Default::default()
        }
    }

    #[test]
    fn test_categories_and_buckets() {
        let events = vec![
            event("Team Standup", Some(15), false),
            event("Focus block", Some(120), false),
            event("Lunch", Some(60), false),
        ];
        let stats = analyze_category_stats(&events, &rules());

        let standups = &stats.categories["daily standups"];
        assert_eq!(standups.count, 1);
        assert_eq!(standups.duration_secs, 15 * 60);
        assert_eq!(standups.events[0].summary, "Team Standup");

        assert_eq!(stats.categories["focus"].duration_secs, 120 * 60);
        assert_eq!(stats.categories[OTHER].count, 1);

        // bucket uses general categories only
        assert_eq!(stats.meeting_secs, 15 * 60);
        assert_eq!(stats.focus_secs, 120 * 60);
        assert_eq!(stats.learning_secs, 0);
        assert_eq!(stats.admin_secs, 0);
        assert_eq!(stats.bucket_secs(TimeBucket::Other), 0);
    }

    #[test]
    fn test_all_day_events_are_excluded() {
        let events = vec![
            event("Focus day", None, true),
            event("Focus offsite", Some(24 * 60), false),
        ];
        let stats = analyze_category_stats(&events, &rules());
        assert!(stats.categories.is_empty());
        assert_eq!(stats.focus_secs, 0);
    }

    #[test]
    fn test_degenerate_durations_are_kept() {
        let events = vec![
            event("Focus", Some(60), false),
            event("Focus", Some(0), false),
            event("Focus", Some(-30), false),
            event("Focus", None, false),
        ];
        let stats = analyze_category_stats(&events, &rules());
        let focus = &stats.categories["focus"];
        assert_eq!(focus.count, 4);
        assert_eq!(focus.duration_secs, 30 * 60);
        assert_eq!(stats.focus_secs, 30 * 60);
    }

    #[test]
    fn test_empty_input() {
        let stats = analyze_category_stats(&[], &rules());
        assert_eq!(stats, EventCategoryStats::default());
    }
}
