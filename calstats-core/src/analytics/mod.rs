//! Analytics over parsed calendar events
//!
//! Every statistic is recomputed from the filtered event list on each run:
//! - Range filtering (inclusive, day granularity)
//! - All-day classification
//! - Per-title stats and ranking views
//! - Category breakdown and time buckets
//! - Working-hours histogram and peak hours
//!
//! [`CalendarAnalyzer`] ties these together with the directory loader and
//! produces a [`CalendarReport`].

pub mod all_day;
pub mod categories;
pub mod range;
pub mod report;
pub mod titles;
pub mod working_hours;

pub use all_day::{day_span, is_all_day};
pub use categories::analyze_category_stats;
pub use range::filter_by_range;
pub use report::{build_report, CalendarAnalyzer, CalendarReport, ReportSummary};
pub use titles::{
    all_day_stats, group_by_title, rank_by_count, rank_by_days, rank_by_duration, timed_duration_secs,
    title_stats,
};
pub use working_hours::{analyze_working_hours, peak_hours, PEAK_HOUR_COUNT};
