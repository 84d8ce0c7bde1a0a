//! # calstats-core
//!
//! Core library for calstats - a calendar export analyzer.
//!
//! This library provides:
//! - Domain types for events and derived statistics
//! - An `.ics` block parser and recursive directory loader
//! - Keyword-based categorization driven by a rules file
//! - Aggregation and ranking over a date range
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Pipeline
//!
//! Data flows through three stages:
//! - **Ingest:** `.ics` files on disk are parsed into [`Event`]s
//! - **Filter:** events are restricted to an inclusive [`DateRange`]
//! - **Analyze:** per-title, category and working-hours statistics are derived
//!
//! ## Example
//!
//! ```rust,no_run
//! use calstats_core::{CalendarAnalyzer, Config, DateRange};
//!
//! let config = Config::load().expect("failed to load config");
//! let analyzer = CalendarAnalyzer::from_config(&config).expect("missing rules");
//! let range = DateRange::parse("2024-01-01", "2024-01-31").expect("bad range");
//! let report = analyzer.analyze(range).expect("analysis failed");
//! println!("{} events", report.summary.total_events);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{CalendarAnalyzer, CalendarReport, ReportSummary};
pub use categorize::CategorizationRules;
pub use config::{Config, DateRange};
pub use error::{Error, Result};
pub use ingest::{CalendarLoader, LoadProgress, LoadResult};
pub use types::*;

// Public modules
pub mod analytics;
pub mod categorize;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod types;
