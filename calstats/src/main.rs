//! calstats - where did the week go?
//!
//! Reads calendar exports (`.ics`) from a directory, keeps the events inside
//! a date range and prints per-title, category and working-hours statistics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use calstats_core::format::{format_duration, format_hour};
use calstats_core::{CalendarAnalyzer, CalendarReport, Config, DateRange, LoadProgress, TimeBucket};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "calstats")]
#[command(about = "Calendar time analysis from .ics exports")]
#[command(version)]
struct Args {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long, env = "START_DATE")]
    start: Option<NaiveDate>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long, env = "END_DATE")]
    end: Option<NaiveDate>,

    /// Directory scanned recursively for .ics files
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Categorization rules file (TOML)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/calstats/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };
    let _log_guard = calstats_core::logging::init(&config.logging).ok();

    if let Some(dir) = args.dir.clone() {
        config.calendar.dir = dir;
    }
    if let Some(rules) = args.rules.clone() {
        config.categorization.rules_path = Some(rules);
    }

    let range = resolve_range(&args, &config)?;
    let analyzer = CalendarAnalyzer::from_config(&config).context("cannot categorize events")?;

    eprintln!(
        "Analyzing calendar events from directory: {}",
        config.calendar.dir.display()
    );
    let report = analyzer
        .analyze_with_progress(range, |progress| match progress {
            LoadProgress::FileStarted { path, .. } => {
                eprintln!("Reading calendar file: {}", path.display());
            }
            LoadProgress::FileFailed { path, error } => {
                eprintln!("Error parsing ICS file {}: {}", path.display(), error);
                eprintln!("Continuing with other files...");
            }
            LoadProgress::FileParsed { .. } => {}
        })
        .context("calendar analysis failed")?;

    tracing::info!(
        start = %range.start,
        end = %range.end,
        events = report.summary.total_events,
        "Report ready"
    );

    match args.format {
        OutputFormat::Text => print_terminal(&report, &analyzer),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

/// Flags (or `START_DATE`/`END_DATE`) win over the configured range.
fn resolve_range(args: &Args, config: &Config) -> Result<DateRange> {
    let start = args.start.or(config.range.start_date);
    let end = args.end.or(config.range.end_date);

    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange::new(start, end)?),
        _ => anyhow::bail!(
            "a date range is required: pass --start and --end (or set START_DATE and END_DATE)"
        ),
    }
}

fn print_terminal(report: &CalendarReport, analyzer: &CalendarAnalyzer) {
    let range = report.range;

    println!();
    println!("Calendar events from {} to {}:", range.start, range.end);
    for event in &report.events {
        let started = event
            .start
            .map(|s| s.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let duration = if calstats_core::analytics::is_all_day(event) {
            " (-)".to_string()
        } else if event.start.is_some() && event.end.is_some() {
            format!(" ({})", format_duration(event.raw_duration_secs()))
        } else {
            String::new()
        };
        println!("- {}: {}{}", started, event.summary, duration);
    }

    let summary = &report.summary;
    println!();
    println!("Calendar summary from {} to {}:", range.start, range.end);
    println!("Admin time: {}", format_duration(summary.admin_secs));
    println!("All-day events: {}", summary.all_day_titles);
    println!("Event categories: {}", summary.event_categories);
    println!("Event titles: {}", summary.event_titles);
    println!("Focus time: {}", format_duration(summary.focus_secs));
    println!("Learning time: {}", format_duration(summary.learning_secs));
    println!("Meeting time: {}", format_duration(summary.meeting_secs));
    println!("Total duration: {}", format_duration(summary.total_duration_secs));
    println!("Total events: {}", summary.total_events);
    println!("Total working hours: {}", format_duration(summary.total_working_secs));

    println!();
    println!("Top events by count:");
    for (i, stats) in report.top_by_count().iter().enumerate() {
        let duration = if stats.duration_secs >= 60 {
            format!(" ({})", format_duration(stats.duration_secs))
        } else {
            String::new()
        };
        println!("{:2}. {}: {} events{}", i + 1, stats.title, stats.count, duration);
    }

    println!();
    println!("Top events by total duration:");
    for (i, stats) in report.top_by_duration().iter().enumerate() {
        println!(
            "{:2}. {}: {} ({} events)",
            i + 1,
            stats.title,
            format_duration(stats.duration_secs),
            stats.count
        );
    }

    let by_days = report.top_by_days();
    if !by_days.is_empty() {
        println!();
        println!("All-day events ranking by total days:");
        for (i, stats) in by_days.iter().enumerate() {
            println!("{:2}. {}: {} days ({} events)", i + 1, stats.title, stats.days(), stats.count);
        }
    }

    let rules = analyzer.rules();
    let categories = &report.category_stats;
    println!();
    println!("Work Category Analysis:");
    for (label, bucket) in [
        ("Meeting", TimeBucket::Meeting),
        ("Focus", TimeBucket::Focus),
        ("Learning", TimeBucket::Learning),
        ("Admin", TimeBucket::Admin),
    ] {
        println!("- {} time: {}", label, format_duration(categories.bucket_secs(bucket)));
    }
    for (category, info) in &categories.categories {
        println!(
            "  {}: {} events, {}",
            rules.display_name(category),
            info.count,
            format_duration(info.duration_secs)
        );
    }

    let hours = &report.working_hours;
    println!();
    println!("Working Hours Analysis:");
    println!("- Total working hours: {}", format_duration(hours.total_working_secs));
    if !hours.peak_hours.is_empty() {
        let peaks: Vec<String> = hours.peak_hours.iter().map(|&h| format_hour(h)).collect();
        println!("- Peak activity hours: {}", peaks.join(", "));
    }

    if !report.errors.is_empty() || !report.warnings.is_empty() {
        println!();
        println!(
            "{} file(s) skipped, {} warning(s); see logs in {}",
            report.errors.len(),
            report.warnings.len(),
            calstats_core::logging::log_dir().display()
        );
    }
}
