//! Ingestion layer for calendar exports
//!
//! Walks a directory tree, parses every `.ics` file and concatenates the
//! events.
//!
//! ```text
//! ┌─────────────────┐     ┌────────────────┐     ┌─────────────┐
//! │  Calendar dir   │ ──► │ CalendarLoader │ ──► │ LoadResult  │
//! │ (**/*.ics)      │     │                │     │ (events)    │
//! └─────────────────┘     └────────────────┘     └─────────────┘
//!                               │
//!                               ▼
//!                    ┌──────────────────────┐
//!                    │  IcsParser           │
//!                    │  └─ decode_datetime  │
//!                    └──────────────────────┘
//! ```
//!
//! A file that cannot be read is reported through the progress callback and
//! recorded in [`LoadResult::errors`]; the walk continues with the next file.
//! Events are not deduplicated across files.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use calstats_core::ingest::CalendarLoader;
//!
//! let loader = CalendarLoader::new("storage/calendar");
//! let result = loader.load()?;
//! println!("Parsed {} events from {} files", result.events.len(), result.files_processed);
//! ```

mod datetime;
mod parser;

pub use datetime::{decode_datetime, property_value, DatetimeError};
pub use parser::{IcsParser, ParseResult};

use crate::error::{Error, Result};
use crate::types::Event;
use glob::MatchOptions;
use std::path::{Path, PathBuf};

/// Extension recognised as a calendar export (matched case-insensitively).
pub const CALENDAR_EXTENSION: &str = "ics";

/// Result of loading a whole directory.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Events from every readable file, in visit order then file order
    pub events: Vec<Event>,
    /// Number of files parsed successfully
    pub files_processed: usize,
    /// Errors encountered (file path → error message)
    pub errors: Vec<(PathBuf, String)>,
    /// Warnings from parsing, prefixed with the file path
    pub warnings: Vec<String>,
}

/// Progress notifications emitted while loading.
#[derive(Debug)]
pub enum LoadProgress<'a> {
    /// About to parse `path` (`index` is zero-based)
    FileStarted {
        index: usize,
        total: usize,
        path: &'a Path,
    },
    /// `path` parsed successfully
    FileParsed { path: &'a Path, events: usize },
    /// `path` could not be read; it contributes nothing
    FileFailed { path: &'a Path, error: &'a Error },
}

/// Discovers and parses calendar files below a root directory.
pub struct CalendarLoader {
    root: PathBuf,
    parser: IcsParser,
}

impl CalendarLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: IcsParser::new(),
        }
    }

    /// Root directory being scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fail early when the root directory is missing.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(Error::CalendarDirNotFound(self.root.clone()));
        }
        Ok(())
    }

    /// Discover calendar files recursively, in sorted visit order.
    ///
    /// Entries that cannot be inspected (e.g. unreadable directories) are
    /// returned as errors alongside the files that were found.
    pub fn discover_files(&self) -> Result<(Vec<PathBuf>, Vec<(PathBuf, String)>)> {
        self.validate()?;

        let pattern = format!(
            "{}/**/*.{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            CALENDAR_EXTENSION
        );
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };

        let entries = glob::glob_with(&pattern, options).map_err(|e| Error::Pattern(e.to_string()))?;

        let mut files = Vec::new();
        let mut errors = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if is_calendar_file(&path) => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %e.path().display(), error = %e.error(), "Cannot inspect path");
                    errors.push((e.path().to_path_buf(), e.error().to_string()));
                }
            }
        }

        Ok((files, errors))
    }

    /// Load every calendar file below the root.
    pub fn load(&self) -> Result<LoadResult> {
        self.load_with_progress(|_| {})
    }

    /// Load every calendar file, reporting progress to `on_progress`.
    ///
    /// Only a missing root directory or an invalid pattern is fatal.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// loader.load_with_progress(|progress| {
    ///     if let LoadProgress::FileFailed { path, error } = progress {
    ///         eprintln!("Skipping {}: {}", path.display(), error);
    ///     }
    /// })?;
    /// ```
    pub fn load_with_progress<F>(&self, mut on_progress: F) -> Result<LoadResult>
    where
        F: FnMut(LoadProgress<'_>),
    {
        let (files, discovery_errors) = self.discover_files()?;
        let total = files.len();

        tracing::info!(root = %self.root.display(), count = total, "Discovered calendar files");

        let mut result = LoadResult {
            errors: discovery_errors,
            ..Default::default()
        };

        for (index, path) in files.iter().enumerate() {
            on_progress(LoadProgress::FileStarted { index, total, path });

            match self.parser.parse_file(path) {
                Ok(parsed) => {
                    tracing::debug!(
                        path = %path.display(),
                        events = parsed.events.len(),
                        warnings = parsed.warnings.len(),
                        "Parsed calendar file"
                    );
                    on_progress(LoadProgress::FileParsed {
                        path,
                        events: parsed.events.len(),
                    });
                    result.files_processed += 1;
                    result.events.extend(parsed.events);
                    result.warnings.extend(
                        parsed
                            .warnings
                            .into_iter()
                            .map(|w| format!("{}: {}", path.display(), w)),
                    );
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse calendar file, continuing");
                    on_progress(LoadProgress::FileFailed { path, error: &e });
                    result.errors.push((path.clone(), e.to_string()));
                }
            }
        }

        tracing::info!(
            files = result.files_processed,
            events = result.events.len(),
            errors = result.errors.len(),
            "Calendar load complete"
        );

        Ok(result)
    }
}

/// Non-directory entry whose name ends in `.ics` (any case).
///
/// Entries that cannot be inspected, such as dangling links, are kept so
/// that opening them fails and is reported.
fn is_calendar_file(path: &Path) -> bool {
    !path.is_dir()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(CALENDAR_EXTENSION))
            .unwrap_or(false)
}
