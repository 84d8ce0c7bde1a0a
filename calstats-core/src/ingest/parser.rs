//! Event block parser
//!
//! A line-oriented state machine over one calendar export. Only `VEVENT`
//! blocks are modelled; calendar-level properties, `VTIMEZONE`, `VTODO` and
//! everything else outside an event block are skipped.
//!
//! ```text
//!            BEGIN:VEVENT
//!   Outside ─────────────► InEvent ──┐ property line:
//!      ▲                      │   ◄──┘ update builder
//!      └──────────────────────┘
//!            END:VEVENT (emit)
//! ```
//!
//! ## Error Handling
//!
//! - **Undecodable datetime**: the field keeps whatever an earlier line set
//!   (`None` if nothing did), a warning is recorded in
//!   [`ParseResult::warnings`], parsing continues.
//! - **Invalid UTF-8**: the line is decoded lossily (U+FFFD) with a warning.
//! - **Unterminated trailing block**: dropped, with a warning.
//! - **`BEGIN:VEVENT` inside a block**: the partial block is discarded and a
//!   fresh one starts.
//! - **I/O failure while reading**: returned as `Err`; the caller decides
//!   whether to skip the file.

use crate::error::Result;
use crate::ingest::datetime::{decode_datetime, property_value};
use crate::types::Event;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";
const ALL_DAY_MARKER: &str = "VALUE=DATE";

/// Events and non-fatal warnings extracted from one file.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Events in file order
    pub events: Vec<Event>,
    /// Warnings encountered during parsing (non-fatal)
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InEvent,
}

/// Accumulator for the block currently being read.
///
/// Lives from `BEGIN:VEVENT` to `END:VEVENT`; only a committed builder
/// produces an [`Event`].
#[derive(Debug, Default)]
struct EventBuilder {
    event: Event,
    /// Line number of the `BEGIN:VEVENT` that opened this block
    opened_at: usize,
}

impl EventBuilder {
    fn new(opened_at: usize) -> Self {
        Self {
            event: Event::default(),
            opened_at,
        }
    }

    /// Apply one property line. Unknown properties are ignored.
    fn apply(&mut self, line: &str, line_no: usize, warnings: &mut Vec<String>) {
        if let Some(uid) = line.strip_prefix("UID:") {
            self.event.uid = uid.to_string();
        } else if let Some(summary) = line.strip_prefix("SUMMARY:") {
            self.event.summary = summary.to_string();
        } else if line.starts_with("DTSTART") {
            if line.contains(ALL_DAY_MARKER) {
                self.event.is_all_day = true;
            }
            if let Some(ts) = decode_field("DTSTART", property_value(line), line_no, warnings) {
                self.event.start = Some(ts);
            }
        } else if line.starts_with("DTEND") {
            if let Some(ts) = decode_field("DTEND", property_value(line), line_no, warnings) {
                self.event.end = Some(ts);
            }
        } else if let Some(created) = line.strip_prefix("CREATED:") {
            if let Some(ts) = decode_field("CREATED", created, line_no, warnings) {
                self.event.created = Some(ts);
            }
        }
    }

    fn finish(self) -> Event {
        self.event
    }
}

fn decode_field(
    property: &str,
    value: &str,
    line_no: usize,
    warnings: &mut Vec<String>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match decode_datetime(value) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!(property, line = line_no, error = %e, "Failed to decode datetime");
            warnings.push(format!("line {}: {}: {}", line_no, property, e));
            None
        }
    }
}

/// Parser for iCalendar (`.ics`) exports.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcsParser;

impl IcsParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file from disk.
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse in-memory content.
    pub fn parse_str(&self, content: &str) -> ParseResult {
        let mut machine = BlockMachine::default();
        for (idx, line) in content.lines().enumerate() {
            machine.feed(line, idx + 1);
        }
        machine.finish()
    }

    /// Parse any buffered reader line by line.
    ///
    /// Lines are split on raw `\n` bytes, so non-UTF-8 content does not stop
    /// the parse. Only read errors are returned as `Err`.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<ParseResult> {
        let mut machine = BlockMachine::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                tracing::debug!(line = line_no, "Replaced invalid UTF-8");
                machine
                    .result
                    .warnings
                    .push(format!("line {}: invalid UTF-8 replaced", line_no));
            }
            machine.feed(&line, line_no);
        }

        Ok(machine.finish())
    }
}

/// The two-state block machine shared by all input sources.
#[derive(Debug)]
struct BlockMachine {
    state: State,
    current: Option<EventBuilder>,
    result: ParseResult,
}

impl Default for BlockMachine {
    fn default() -> Self {
        Self {
            state: State::Outside,
            current: None,
            result: ParseResult::default(),
        }
    }
}

impl BlockMachine {
    fn feed(&mut self, raw: &str, line_no: usize) {
        let line = raw.trim();

        match self.state {
            State::Outside => {
                if line == BEGIN_EVENT {
                    self.state = State::InEvent;
                    self.current = Some(EventBuilder::new(line_no));
                }
            }
            State::InEvent if line == END_EVENT => {
                if let Some(builder) = self.current.take() {
                    self.result.events.push(builder.finish());
                }
                self.state = State::Outside;
            }
            State::InEvent if line == BEGIN_EVENT => {
                if let Some(abandoned) = self.current.replace(EventBuilder::new(line_no)) {
                    self.result.warnings.push(format!(
                        "line {}: BEGIN:VEVENT inside open block from line {}; partial block discarded",
                        line_no, abandoned.opened_at
                    ));
                }
            }
            State::InEvent => {
                if let Some(builder) = self.current.as_mut() {
                    builder.apply(line, line_no, &mut self.result.warnings);
                }
            }
        }
    }

    fn finish(mut self) -> ParseResult {
        if let Some(unterminated) = self.current.take() {
            tracing::debug!(line = unterminated.opened_at, "Dropping unterminated event block");
            self.result.warnings.push(format!(
                "line {}: event block not terminated by END:VEVENT; dropped",
                unterminated.opened_at
            ));
        }
        self.result
    }
}
