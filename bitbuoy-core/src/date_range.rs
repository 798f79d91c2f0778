use crate::format;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Optional calendar-date filter applied to displayed measurements.
///
/// Both bounds are inclusive and independently optional. The filter never
/// changes what is fetched, only what is drawn.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// True when the calendar date of `ts`, as seen in `tz`, lies within
    /// the bounds. Use the zone the picker and the chart axis are shown in.
    pub fn contains<Tz: TimeZone>(&self, ts: &DateTime<Utc>, tz: &Tz) -> bool {
        let date = ts.with_timezone(tz).date_naive();
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Text of the date picker button.
    pub fn label(&self) -> String {
        match (self.from, self.to) {
            (Some(from), Some(to)) => format!(
                "{} - {}",
                format::picker_date(&from),
                format::picker_date(&to)
            ),
            (Some(from), None) => format::picker_date(&from),
            _ => "Pick a date".to_string(),
        }
    }
}
