//! Display formatting for timestamps and dates.
//!
//! Functions that render a wall-clock time take the target time zone so the
//! browser can pass `Local` while tests pin `Utc`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt::Display;

/// Chart x-axis tick format.
pub const HOUR_MINUTE_FORMAT: &str = "%H:%M";

/// "Apr 1, 2023, 12:00:00 PM"
pub const LAST_ACTIVE_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

/// "Apr 01, 2023"
pub const PICKER_DATE_FORMAT: &str = "%b %d, %Y";

/// Date input value format ("YYYY-MM-DD").
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder for buoys that never reported.
pub const NO_DATA: &str = "No data";

pub fn hour_minute<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format(HOUR_MINUTE_FORMAT).to_string()
}

/// Last-active text for a buoy, or [`NO_DATA`].
pub fn last_active<Tz: TimeZone>(ts: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match ts {
        Some(ts) => ts.with_timezone(tz).format(LAST_ACTIVE_FORMAT).to_string(),
        None => NO_DATA.to_string(),
    }
}

pub fn picker_date(date: &NaiveDate) -> String {
    date.format(PICKER_DATE_FORMAT).to_string()
}

/// Format a date for an `<input type="date">` value.
pub fn input_date(date: Option<&NaiveDate>) -> String {
    date.map(|d| d.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse an `<input type="date">` value. Empty input clears the bound.
pub fn parse_input_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), INPUT_DATE_FORMAT).ok()
}
