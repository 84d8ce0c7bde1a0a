//! Full analysis pipeline and the report handed to presentation.

use serde::Serialize;
use std::path::PathBuf;

use super::categories::analyze_category_stats;
use super::range::filter_by_range;
use super::titles::{
    all_day_stats, group_by_title, rank_by_count, rank_by_days, rank_by_duration, title_stats,
    timed_duration_secs,
};
use super::working_hours::analyze_working_hours;
use crate::categorize::CategorizationRules;
use crate::config::{Config, DateRange};
use crate::error::Result;
use crate::ingest::{CalendarLoader, LoadProgress};
use crate::types::{Event, EventCategoryStats, TitleStats, WorkingHoursStats};

/// Headline numbers for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Events in range
    pub total_events: usize,
    /// Positive timed duration, all-day events excluded
    pub total_duration_secs: i64,
    /// Distinct non-empty titles
    pub event_titles: usize,
    /// Titles with at least one all-day event
    pub all_day_titles: usize,
    pub meeting_secs: i64,
    pub focus_secs: i64,
    pub learning_secs: i64,
    pub admin_secs: i64,
    pub total_working_secs: i64,
    /// Distinct categories among timed events
    pub event_categories: usize,
}

/// Everything derived from one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarReport {
    pub range: DateRange,
    pub summary: ReportSummary,
    /// Events in range, ordered by start
    pub events: Vec<Event>,
    /// Timed view, sorted by title
    pub title_stats: Vec<TitleStats>,
    /// All-day view, sorted by title
    pub all_day_stats: Vec<TitleStats>,
    pub category_stats: EventCategoryStats,
    pub working_hours: WorkingHoursStats,
    /// Calendar files parsed successfully
    pub files_processed: usize,
    /// Files that could not be read (path, message)
    pub errors: Vec<(PathBuf, String)>,
    /// Non-fatal parse warnings
    pub warnings: Vec<String>,
}

impl CalendarReport {
    /// Timed titles by count descending.
    pub fn top_by_count(&self) -> Vec<TitleStats> {
        rank_by_count(&self.title_stats)
    }

    /// Timed titles by duration descending, zero-duration titles left out.
    pub fn top_by_duration(&self) -> Vec<TitleStats> {
        rank_by_duration(&self.title_stats)
            .into_iter()
            .filter(|stats| stats.duration_secs > 0)
            .collect()
    }

    /// All-day titles by total days descending.
    pub fn top_by_days(&self) -> Vec<TitleStats> {
        rank_by_days(&self.all_day_stats)
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build a report over an in-memory event list.
///
/// Diagnostics fields are left empty; [`CalendarAnalyzer`] fills them in.
pub fn build_report(events: &[Event], range: DateRange, rules: &CategorizationRules) -> CalendarReport {
    let mut events = filter_by_range(events, &range);
    events.sort_by_key(|event| event.start);

    let grouped = group_by_title(&events);
    let title_stats = title_stats(&grouped);
    let all_day_stats = all_day_stats(&grouped);
    let event_titles = grouped.len();

    let category_stats = analyze_category_stats(&events, rules);
    let working_hours = analyze_working_hours(&events);

    let summary = ReportSummary {
        total_events: events.len(),
        total_duration_secs: timed_duration_secs(&events),
        event_titles,
        all_day_titles: all_day_stats.len(),
        meeting_secs: category_stats.meeting_secs,
        focus_secs: category_stats.focus_secs,
        learning_secs: category_stats.learning_secs,
        admin_secs: category_stats.admin_secs,
        total_working_secs: working_hours.total_working_secs,
        event_categories: category_stats.categories.len(),
    };

    CalendarReport {
        range,
        summary,
        events,
        title_stats,
        all_day_stats,
        category_stats,
        working_hours,
        files_processed: 0,
        errors: Vec::new(),
        warnings: Vec::new(),
    }
}

/// Loads a calendar directory and analyses it against a rule set.
pub struct CalendarAnalyzer {
    loader: CalendarLoader,
    rules: CategorizationRules,
}

impl CalendarAnalyzer {
    pub fn new(calendar_dir: impl Into<PathBuf>, rules: CategorizationRules) -> Self {
        Self {
            loader: CalendarLoader::new(calendar_dir),
            rules,
        }
    }

    /// Build an analyzer from configuration.
    ///
    /// Fails with [`crate::Error::RulesNotFound`] when the rules file is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rules = CategorizationRules::load_from(&config.categorization.resolved_rules_path())?;
        Ok(Self::new(config.calendar.dir.clone(), rules))
    }

    pub fn rules(&self) -> &CategorizationRules {
        &self.rules
    }

    pub fn loader(&self) -> &CalendarLoader {
        &self.loader
    }

    pub fn analyze(&self, range: DateRange) -> Result<CalendarReport> {
        self.analyze_with_progress(range, |_| {})
    }

    /// Run the whole pipeline, forwarding loader progress to `on_progress`.
    pub fn analyze_with_progress<F>(&self, range: DateRange, on_progress: F) -> Result<CalendarReport>
    where
        F: FnMut(LoadProgress<'_>),
    {
        tracing::info!(
            dir = %self.loader.root().display(),
            start = %range.start,
            end = %range.end,
            "Analyzing calendar"
        );

        let loaded = self.loader.load_with_progress(on_progress)?;
        let mut report = build_report(&loaded.events, range, &self.rules);
        report.files_processed = loaded.files_processed;
        report.errors = loaded.errors;
        report.warnings = loaded.warnings;

        tracing::info!(
            events = report.summary.total_events,
            titles = report.summary.event_titles,
            categories = report.summary.event_categories,
            "Analysis complete"
        );

        Ok(report)
    }
}
