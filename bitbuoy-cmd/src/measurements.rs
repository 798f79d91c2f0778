//! `measurements` subcommand: fetch readings for a set of buoys and export CSV.

use crate::SharedStore;
use bitbuoy_api::native::HttpClient;
use bitbuoy_api::sync;
use bitbuoy_core::date_range::DateRange;
use bitbuoy_core::measurement::Measurement;
use bitbuoy_core::selection::Selection;
use bitbuoy_core::store::StoreHandle;
use chrono::Local;
use log::info;
use std::fs::File;
use std::io::{self, Write};

/// Trim and dedupe the serials given on the command line.
pub fn parse_serials(raw: &[String]) -> Selection {
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Write measurements as CSV with a header row. Returns the number of rows.
pub fn write_csv<W: Write>(writer: W, measurements: &[&Measurement]) -> anyhow::Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for measurement in measurements {
        wtr.serialize(measurement)?;
    }
    wtr.flush()?;
    Ok(measurements.len())
}

pub async fn run_measurements(
    client: &HttpClient,
    store: &SharedStore,
    serials: &[String],
    output: Option<&str>,
    range: DateRange,
) -> anyhow::Result<()> {
    let selection = parse_serials(serials);
    if selection.is_empty() {
        anyhow::bail!("No buoy serial numbers given");
    }

    let request = store.update(|s| {
        s.set_date_range(range);
        s.set_selection(selection)
    });
    if let Some(request) = request {
        info!("Fetching measurements for [{}]", request.query_value());
        sync::fetch_measurements(client, store, request).await;
    }

    let store = store.borrow();
    if let Some(err) = store.measurements().error() {
        anyhow::bail!("Failed to fetch measurements: {}", err);
    }
    let visible = store.visible_measurements(&Local);

    let rows = match output {
        Some(path) => {
            let rows = write_csv(File::create(path)?, &visible)?;
            info!("Wrote {} measurements to {}", rows, path);
            rows
        }
        None => write_csv(io::stdout().lock(), &visible)?,
    };
    if rows == 0 {
        info!("No measurements matched {}", store.date_range().label());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn measurement(serial: &str, hour: u32, position: Option<(f64, f64)>) -> Measurement {
        Measurement {
            buoy_serial_number: serial.to_string(),
            ambient_temp: 25.5,
            water_temp: 20.3,
            water_pollution: 0.05,
            humidity: 65.0,
            lat: position.map(|p| p.0),
            long: position.map(|p| p.1),
            timestamp: Utc.with_ymd_and_hms(2023, 4, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_parse_serials() {
        let raw: Vec<String> = ["B002", " B001 ", "", "B002"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_serials(&raw).query_value(), "B001,B002");
        assert!(parse_serials(&[" ".to_string()]).is_empty());
    }

    #[test]
    fn test_write_csv() {
        let first = measurement("B001", 10, Some((50.7, 18.1)));
        let second = measurement("B002", 11, None);
        let mut out = Vec::new();
        let rows = write_csv(&mut out, &[&first, &second]).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "buoy_serial_number,ambient_temp,water_temp,water_pollution,humidity,lat,long,timestamp"
        );
        assert!(lines[1].starts_with("B001,25.5,20.3,0.05,65.0,50.7,18.1,2023-04-01T10:00:00"));
        assert!(lines[2].starts_with("B002,25.5,20.3,0.05,65.0,,,2023-04-01T11:00:00"));
    }

    #[test]
    fn test_write_csv_empty() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&mut out, &[]).unwrap(), 0);
        assert!(out.is_empty());
    }
}
