//! Chart series derived from measurements.
//!
//! Points derive `Serialize` so they can be handed to D3.js as JSON from the
//! Dioxus WASM frontend.

use crate::format;
use crate::measurement::{Dimension, Measurement};
use chrono::{TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

/// A single point of a chart line.
///
/// `serial_number` lets the chart draw one line per buoy when several buoys
/// are selected.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub serial_number: String,
    /// RFC 3339 timestamp, the x value
    pub timestamp: String,
    /// `HH:MM` tick / tooltip label
    pub label: String,
    pub value: f64,
}

/// Per-chart rendering options passed alongside the points.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub title: String,
    pub y_axis_label: String,
    pub y_unit: String,
    pub color: String,
    pub tick_format: String,
}

impl ChartConfig {
    pub fn for_dimension(dimension: Dimension) -> Self {
        Self {
            title: dimension.label().to_string(),
            y_axis_label: format!("{} ({})", dimension.label(), dimension.unit()),
            y_unit: dimension.unit().to_string(),
            color: dimension.color().to_string(),
            tick_format: format::HOUR_MINUTE_FORMAT.to_string(),
        }
    }
}

/// One point per measurement for `dimension`, sorted by timestamp.
pub fn series<'a, Tz: TimeZone>(
    measurements: impl IntoIterator<Item = &'a Measurement>,
    dimension: Dimension,
    tz: &Tz,
) -> Vec<ChartPoint>
where
    Tz::Offset: Display,
{
    let mut sorted: Vec<&Measurement> = measurements.into_iter().collect();
    sorted.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.buoy_serial_number.cmp(&b.buoy_serial_number))
    });
    sorted
        .into_iter()
        .map(|m| ChartPoint {
            serial_number: m.buoy_serial_number.clone(),
            timestamp: m.timestamp.to_rfc3339(),
            label: format::hour_minute(&m.timestamp, tz),
            value: m.value(dimension),
        })
        .collect()
}

/// Convenience wrapper for [`series`] in UTC.
pub fn series_utc<'a>(
    measurements: impl IntoIterator<Item = &'a Measurement>,
    dimension: Dimension,
) -> Vec<ChartPoint> {
    series(measurements, dimension, &Utc)
}
