//! `buoys` and `status` subcommands.

use crate::SharedStore;
use bitbuoy_api::native::HttpClient;
use bitbuoy_api::sync;
use bitbuoy_core::activity::is_active;
use bitbuoy_core::buoy::Buoy;
use bitbuoy_core::format::last_active;
use chrono::{DateTime, Local, TimeZone, Utc};
use log::info;
use std::fmt::Display;

/// Fetch the buoy list into the store and hand back a copy.
async fn fetch_buoys(client: &HttpClient, store: &SharedStore) -> anyhow::Result<Vec<Buoy>> {
    sync::load_buoys(client, store).await;
    let store = store.borrow();
    if let Some(err) = store.buoys().error() {
        anyhow::bail!("Failed to fetch buoys: {}", err);
    }
    Ok(store.buoys().data().cloned().unwrap_or_default())
}

/// One line per buoy: serial, active flag, last active time, position.
pub fn buoy_line<Tz: TimeZone>(buoy: &Buoy, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let status = if is_active(buoy, now) { "active" } else { "inactive" };
    let position = buoy
        .position()
        .map(|(lat, lon)| format!("{:.5}, {:.5}", lat, lon))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<10} {:<9} {:<28} {}",
        buoy.serial_number,
        status,
        last_active(buoy.last_measurement_timestamp.as_ref(), tz),
        position
    )
}

/// (active, inactive)
pub fn status_counts(buoys: &[Buoy], now: DateTime<Utc>) -> (usize, usize) {
    let active = buoys.iter().filter(|b| is_active(b, now)).count();
    (active, buoys.len() - active)
}

pub async fn run_buoys(client: &HttpClient, store: &SharedStore) -> anyhow::Result<()> {
    let buoys = fetch_buoys(client, store).await?;
    let now = Utc::now();
    println!("{:<10} {:<9} {:<28} {}", "SERIAL", "STATUS", "LAST ACTIVE", "POSITION");
    for buoy in &buoys {
        println!("{}", buoy_line(buoy, now, &Local));
    }
    info!("{} buoys for user {}", buoys.len(), client.config().user_id);
    Ok(())
}

pub async fn run_status(client: &HttpClient, store: &SharedStore) -> anyhow::Result<()> {
    let buoys = fetch_buoys(client, store).await?;
    let (active, inactive) = status_counts(&buoys, Utc::now());
    println!("{} buoys: {} active, {} inactive", buoys.len(), active, inactive);
    Ok(())
}
