use crate::buoy::Buoy;
use chrono::{DateTime, TimeDelta, Utc};

/// How recent the last measurement must be for a buoy to count as active.
pub const ACTIVE_WINDOW_HOURS: i64 = 2;

/// A buoy is active when its last measurement falls strictly after
/// `now - 2h`. No timestamp means inactive.
pub fn is_active(buoy: &Buoy, now: DateTime<Utc>) -> bool {
    buoy.last_measurement_timestamp
        .map(|ts| is_recent(ts, now))
        .unwrap_or(false)
}

/// The timestamp-only form of [`is_active`].
pub fn is_recent(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    timestamp > now - TimeDelta::hours(ACTIVE_WINDOW_HOURS)
}
