//! Formatting helpers shared by report renderers.

use chrono::Weekday;

/// Format seconds as `"1h30m"`, or `"45m"` under an hour.
///
/// Negative totals keep their sign (`"-1h30m"`); spans under a minute
/// render as `"0m"` either way.
pub fn format_duration(secs: i64) -> String {
    let sign = if secs <= -60 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}{}h{}m", sign, hours, mins)
    } else {
        format!("{}{}m", sign, mins)
    }
}

/// Format an hour of day as `"09:00"`.
pub fn format_hour(hour: u32) -> String {
    format!("{:02}:00", hour)
}

/// Full English weekday name.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
