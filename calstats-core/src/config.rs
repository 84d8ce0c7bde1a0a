//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/calstats/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/calstats/` (~/.config/calstats/)
//! - State/Logs: `$XDG_STATE_HOME/calstats/` (~/.local/state/calstats/)
//!
//! Categorization rules live in a separate file (see
//! [`CategorizationRules`](crate::categorize::CategorizationRules)); this file
//! only points at it.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where calendar exports are read from
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Default analysis window (optional, CLI flags override)
    #[serde(default)]
    pub range: RangeConfig,

    /// Location of the categorization rules
    #[serde(default)]
    pub categorization: CategorizationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Calendar source configuration
#[derive(Debug, Deserialize)]
pub struct CalendarConfig {
    /// Root directory scanned recursively for `.ics` files
    #[serde(default = "default_calendar_dir")]
    pub dir: PathBuf,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            dir: default_calendar_dir(),
        }
    }
}

fn default_calendar_dir() -> PathBuf {
    PathBuf::from("storage/calendar")
}

/// Optional default date range.
///
/// Dates are quoted strings in `YYYY-MM-DD` form.
#[derive(Debug, Deserialize, Default)]
pub struct RangeConfig {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RangeConfig {
    /// Build a [`DateRange`] if both ends are configured.
    pub fn to_range(&self) -> Option<Result<DateRange>> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }
}

/// Categorization rules location
#[derive(Debug, Deserialize, Default)]
pub struct CategorizationConfig {
    /// Path to the rules file (default: `$XDG_CONFIG_HOME/calstats/categorization.toml`)
    pub rules_path: Option<PathBuf>,
}

impl CategorizationConfig {
    /// Resolve the rules path, falling back to the XDG default.
    pub fn resolved_rules_path(&self) -> PathBuf {
        self.rules_path
            .clone()
            .unwrap_or_else(Config::default_rules_path)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Inclusive, day-granularity analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    /// Number of calendar days covered (both ends included).
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| Error::Config(format!("invalid date {:?} (expected YYYY-MM-DD): {}", value, e)))
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the configuration directory
    ///
    /// `$XDG_CONFIG_HOME/calstats/` (~/.config/calstats/)
    pub fn config_dir() -> PathBuf {
        xdg_config_home().join("calstats")
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/calstats/config.toml` (~/.config/calstats/config.toml)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Returns the default categorization rules path
    ///
    /// `$XDG_CONFIG_HOME/calstats/categorization.toml`
    pub fn default_rules_path() -> PathBuf {
        Self::config_dir().join("categorization.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/calstats/` (~/.local/state/calstats/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("calstats")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.calendar.dir, PathBuf::from("storage/calendar"));
        assert!(config.range.to_range().is_none());
        assert!(config.categorization.rules_path.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[calendar]
dir = "/data/exports"

[range]
start_date = "2024-01-01"
end_date = "2024-03-31"

[categorization]
rules_path = "/etc/calstats/rules.toml"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.calendar.dir, PathBuf::from("/data/exports"));
        let range = config.range.to_range().unwrap().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(
            config.categorization.resolved_rules_path(),
            PathBuf::from("/etc/calstats/rules.toml")
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_range_is_ignored() {
        let config: Config = toml::from_str("[range]\nstart_date = \"2024-01-01\"\n").unwrap();
        assert!(config.range.to_range().is_none());
    }

    #[test]
    fn test_date_range_parse() {
        let range = DateRange::parse("2024-01-01", "2024-01-03").unwrap();
        assert_eq!(range.days(), 3);

        let single = DateRange::parse("2024-02-29", "2024-02-29").unwrap();
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        let err = DateRange::parse("2024-01-05", "2024-01-01").unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn test_date_range_rejects_bad_format() {
        assert!(matches!(
            DateRange::parse("2024/01/01", "2024-01-02"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/calstats.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
