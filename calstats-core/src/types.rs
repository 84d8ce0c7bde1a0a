//! Core domain types for calstats
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Event** | One `VEVENT` block from a calendar export |
//! | **All-day event** | An event covering whole days rather than a timed span |
//! | **Category** | Fine-grained label assigned by keyword rules (e.g. "standup") |
//! | **Time bucket** | One of the coarse buckets: meeting, focus, learning, admin, other |
//! | **Peak hour** | One of the top-3 start hours by accumulated timed duration |
//!
//! Derived types (`TitleStats`, `CategoryInfo`, ...) are recomputed from the
//! full filtered event list on every run; nothing here is cached.
//! Durations are carried as whole seconds (`*_secs: i64`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// ============================================
// Event
// ============================================

/// A single calendar occurrence parsed from an event block.
///
/// Timestamps are `None` when the property was missing or could not be
/// decoded; a partially decoded value is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    /// `UID` property (may be empty)
    pub uid: String,
    /// `SUMMARY` property (may be empty)
    pub summary: String,
    /// Decoded `DTSTART`
    pub start: Option<DateTime<Utc>>,
    /// Decoded `DTEND`
    pub end: Option<DateTime<Utc>>,
    /// Decoded `CREATED`
    pub created: Option<DateTime<Utc>>,
    /// Set when `DTSTART` carried `VALUE=DATE`
    pub is_all_day: bool,
}

impl Event {
    /// `end - start` when both timestamps are present.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
            _ => None,
        }
    }

    /// Raw `end - start` in seconds, zero when either end is missing.
    ///
    /// May be zero or negative for degenerate events.
    pub fn raw_duration_secs(&self) -> i64 {
        self.duration().map(|d| d.num_seconds()).unwrap_or(0)
    }

    /// Positive `end - start` in seconds, `None` for missing or non-positive spans.
    pub fn positive_duration_secs(&self) -> Option<i64> {
        self.duration()
            .map(|d| d.num_seconds())
            .filter(|&secs| secs > 0)
    }

    /// Title with surrounding whitespace removed.
    pub fn title(&self) -> &str {
        self.summary.trim()
    }
}

// ============================================
// Time buckets
// ============================================

/// Coarse time bucket used for top-level summary totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Meeting,
    Focus,
    Learning,
    Admin,
    Other,
}

impl TimeBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBucket::Meeting => "meeting",
            TimeBucket::Focus => "focus",
            TimeBucket::Learning => "learning",
            TimeBucket::Admin => "admin",
            TimeBucket::Other => "other",
        }
    }

    /// Map a general category key onto a bucket; unknown keys are `Other`.
    pub fn from_category_key(key: &str) -> Self {
        key.parse().unwrap_or(TimeBucket::Other)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(TimeBucket::Meeting),
            "focus" => Ok(TimeBucket::Focus),
            "learning" => Ok(TimeBucket::Learning),
            "admin" => Ok(TimeBucket::Admin),
            "other" => Ok(TimeBucket::Other),
            _ => Err(format!("unknown time bucket: {}", s)),
        }
    }
}

// ============================================
// Derived statistics
// ============================================

/// Per-title statistics.
///
/// In the timed view `duration_secs` is the sum of positive timed spans.
/// In the all-day view `count` is the number of all-day members and
/// `duration_secs` is the total day-span expressed in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleStats {
    pub title: String,
    pub count: usize,
    pub duration_secs: i64,
}

impl TitleStats {
    /// Whole days represented by `duration_secs` (all-day view).
    pub fn days(&self) -> i64 {
        self.duration_secs / SECS_PER_DAY
    }
}

pub(crate) const SECS_PER_HOUR: i64 = 3600;
pub(crate) const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Members and totals of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub count: usize,
    /// Sum of raw durations (may include zero or negative spans)
    pub duration_secs: i64,
    pub events: Vec<Event>,
}

/// Category breakdown of timed events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventCategoryStats {
    /// Keyed by the category returned from the categorization engine
    pub categories: BTreeMap<String, CategoryInfo>,
    pub meeting_secs: i64,
    pub focus_secs: i64,
    pub learning_secs: i64,
    pub admin_secs: i64,
}

impl EventCategoryStats {
    /// Accumulated time for a bucket. `Other` is not tracked and returns 0.
    pub fn bucket_secs(&self, bucket: TimeBucket) -> i64 {
        match bucket {
            TimeBucket::Meeting => self.meeting_secs,
            TimeBucket::Focus => self.focus_secs,
            TimeBucket::Learning => self.learning_secs,
            TimeBucket::Admin => self.admin_secs,
            TimeBucket::Other => 0,
        }
    }
}

/// Hour-of-day and day-of-week activity of timed events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkingHoursStats {
    /// Start hour (0-23) -> accumulated seconds
    pub hourly_distribution: BTreeMap<u32, i64>,
    /// Weekday name ("Monday") -> accumulated seconds
    pub daily_distribution: BTreeMap<String, i64>,
    /// Up to three hours, busiest first
    pub peak_hours: Vec<u32>,
    pub total_working_secs: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, h, m, 0).unwrap()
    }

    #[test]
    fn test_event_durations() {
        let event = Event {
            start: Some(at(9, 0)),
            end: Some(at(10, 30)),
            ..Default::default()
        };
        assert_eq!(event.raw_duration_secs(), 5400);
        assert_eq!(event.positive_duration_secs(), Some(5400));
    }

    #[test]
    fn test_event_missing_end_is_zero() {
        let event = Event {
            start: Some(at(9, 0)),
            ..Default::default()
        };
        assert_eq!(event.duration(), None);
        assert_eq!(event.raw_duration_secs(), 0);
        assert_eq!(event.positive_duration_secs(), None);
    }

    #[test]
    fn test_event_negative_duration() {
        let event = Event {
            start: Some(at(10, 0)),
            end: Some(at(9, 0)),
            ..Default::default()
        };
        assert_eq!(event.raw_duration_secs(), -3600);
        assert_eq!(event.positive_duration_secs(), None);
    }

    #[test]
    fn test_event_title_trimmed() {
        let event = Event {
            summary: "  Daily Standup \t".to_string(),
            ..Default::default()
        };
        assert_eq!(event.title(), "Daily Standup");
    }

    #[test]
    fn test_time_bucket_from_key() {
        assert_eq!(TimeBucket::from_category_key("meeting"), TimeBucket::Meeting);
        assert_eq!(TimeBucket::from_category_key("admin"), TimeBucket::Admin);
        assert_eq!(TimeBucket::from_category_key("1on1"), TimeBucket::Other);
        assert_eq!(TimeBucket::Learning.to_string(), "learning");
    }

    #[test]
    fn test_title_stats_days() {
        let stats = TitleStats {
            title: "Holiday".to_string(),
            count: 2,
            duration_secs: 3 * SECS_PER_DAY,
        };
        assert_eq!(stats.days(), 3);
    }
}
