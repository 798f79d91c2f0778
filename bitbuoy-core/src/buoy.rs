use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sensor buoy as reported by `GET /user/{id}/buoys`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Buoy {
    /// Unique serial number (e.g. "B001")
    pub serial_number: String,
    /// Time of the most recent measurement, if the buoy ever reported one
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_option")]
    pub last_measurement_timestamp: Option<DateTime<Utc>>,
    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Response body of the buoy list endpoint.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BuoyList {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub buoys: Vec<Buoy>,
}

impl Buoy {
    /// Both coordinates, when the buoy has a known position.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Display label used by the selector and the list panel.
    pub fn label(&self) -> String {
        format!("Buoy {}", self.serial_number)
    }
}
