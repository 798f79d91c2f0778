use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped reading from a buoy, as returned by `POST /measurements/`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub buoy_serial_number: String,
    /// Air temperature in °C
    pub ambient_temp: f64,
    /// Water temperature in °C
    pub water_temp: f64,
    pub water_pollution: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub long: Option<f64>,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

/// The measured quantities, one chart each.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Dimension {
    AmbientTemperature,
    WaterTemperature,
    WaterPollution,
    Humidity,
}

impl Dimension {
    /// Chart order on the dashboard.
    pub const ALL: [Dimension; 4] = [
        Dimension::AmbientTemperature,
        Dimension::WaterTemperature,
        Dimension::WaterPollution,
        Dimension::Humidity,
    ];

    /// Field name on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::AmbientTemperature => "ambient_temp",
            Dimension::WaterTemperature => "water_temp",
            Dimension::WaterPollution => "water_pollution",
            Dimension::Humidity => "humidity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::AmbientTemperature => "Ambient Temperature",
            Dimension::WaterTemperature => "Water Temperature",
            Dimension::WaterPollution => "Water Pollution",
            Dimension::Humidity => "Humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Dimension::AmbientTemperature | Dimension::WaterTemperature => "°C",
            Dimension::WaterPollution => "ppm",
            Dimension::Humidity => "%",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Dimension::AmbientTemperature => "#E65100",
            Dimension::WaterTemperature => "#1565C0",
            Dimension::WaterPollution => "#6A1B9A",
            Dimension::Humidity => "#2E7D32",
        }
    }
}

impl Measurement {
    /// The reading for a single dimension.
    pub fn value(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::AmbientTemperature => self.ambient_temp,
            Dimension::WaterTemperature => self.water_temp,
            Dimension::WaterPollution => self.water_pollution,
            Dimension::Humidity => self.humidity,
        }
    }
}
