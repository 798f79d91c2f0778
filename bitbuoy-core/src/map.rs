//! Map markers for buoys with a known position.

use crate::buoy::Buoy;
use crate::format;
use chrono::TimeZone;
use serde::Serialize;
use std::fmt::Display;

/// OpenStreetMap tile server template.
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile usage policy.
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Centre used when no buoy has coordinates.
pub const DEFAULT_CENTER: (f64, f64) = (50.728064981302595, 18.127457151003952);

pub const DEFAULT_ZOOM: u8 = 13;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMarker {
    pub serial_number: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Popup HTML: serial number and last-active time
    pub popup: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub markers: Vec<MapMarker>,
}

/// One marker per buoy with both coordinates.
pub fn markers<Tz: TimeZone>(buoys: &[Buoy], tz: &Tz) -> Vec<MapMarker>
where
    Tz::Offset: Display,
{
    buoys
        .iter()
        .filter_map(|buoy| {
            let (latitude, longitude) = buoy.position()?;
            Some(MapMarker {
                serial_number: buoy.serial_number.clone(),
                latitude,
                longitude,
                popup: format!(
                    "{}<br/>Last active: {}",
                    escape_html(&buoy.label()),
                    format::last_active(buoy.last_measurement_timestamp.as_ref(), tz)
                ),
            })
        })
        .collect()
}

/// Map view centred on the mean marker position.
pub fn view<Tz: TimeZone>(buoys: &[Buoy], tz: &Tz) -> MapView
where
    Tz::Offset: Display,
{
    let markers = markers(buoys, tz);
    let center = if markers.is_empty() {
        DEFAULT_CENTER
    } else {
        let n = markers.len() as f64;
        let lat = markers.iter().map(|m| m.latitude).sum::<f64>() / n;
        let lon = markers.iter().map(|m| m.longitude).sum::<f64>() / n;
        (lat, lon)
    };
    MapView {
        center,
        zoom: DEFAULT_ZOOM,
        tile_url: TILE_URL.to_string(),
        attribution: TILE_ATTRIBUTION.to_string(),
        markers,
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
