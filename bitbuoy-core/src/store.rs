//! Dashboard state container.
//!
//! `DashboardStore` owns everything the dashboard renders: the buoy list, the
//! measurements for the current selection, the selection itself and the date
//! filter. It is mutated only through the methods below; the data-access
//! layer (`bitbuoy_api::sync`) calls them around each fetch.
//!
//! # Stale responses
//!
//! Every selection change bumps `generation` and hands out a
//! [`MeasurementRequest`] tagged with it. [`DashboardStore::finish_measurement_fetch`]
//! applies a result only if its request is still current, so a slow response
//! for an older selection can never overwrite newer state.

use crate::activity;
use crate::buoy::Buoy;
use crate::chart::{self, ChartPoint};
use crate::date_range::DateRange;
use crate::error::FetchError;
use crate::format;
use crate::map::{self, MapView};
use crate::measurement::{Dimension, Measurement};
use crate::selection::Selection;
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, error, info};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

/// State of one remote data source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    /// Nothing requested (or the request was withdrawn)
    #[default]
    Idle,
    Loading,
    Loaded(T),
    /// The request failed; holds a message for the operator
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => Loadable::Loaded(data),
            Err(e) => Loadable::Failed(e.to_string()),
        }
    }
}

/// A buoy-list fetch the store is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuoyRequest {
    pub generation: u64,
}

/// A measurement fetch the store is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRequest {
    pub generation: u64,
    pub serial_numbers: Vec<String>,
}

impl MeasurementRequest {
    /// Comma-joined serial list for the `serial_numbers` query parameter.
    pub fn query_value(&self) -> String {
        self.serial_numbers.join(",")
    }
}

/// One row of the buoy list panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuoyEntry {
    pub serial_number: String,
    pub label: String,
    pub active: bool,
    pub selected: bool,
    /// Formatted last-active time or the "No data" placeholder
    pub last_active: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStore {
    buoys: Loadable<Vec<Buoy>>,
    measurements: Loadable<Vec<Measurement>>,
    selection: Selection,
    date_range: DateRange,
    generation: u64,
    buoy_generation: u64,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buoys(&self) -> &Loadable<Vec<Buoy>> {
        &self.buoys
    }

    pub fn measurements(&self) -> &Loadable<Vec<Measurement>> {
        &self.measurements
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ─── Buoy list ───

    /// Mark the buoy list as loading. Any earlier buoy fetch is superseded.
    pub fn begin_buoy_fetch(&mut self) -> BuoyRequest {
        self.buoy_generation += 1;
        self.buoys = Loadable::Loading;
        BuoyRequest {
            generation: self.buoy_generation,
        }
    }

    /// Replace the buoy list wholesale with the fetch outcome. Returns false,
    /// leaving state untouched, when `request` was superseded by a newer
    /// fetch or a reset.
    pub fn finish_buoy_fetch(&mut self, request: &BuoyRequest, result: Result<Vec<Buoy>, FetchError>) -> bool {
        if request.generation != self.buoy_generation {
            debug!("Dropping stale buoy list (generation {})", request.generation);
            return false;
        }
        match &result {
            Ok(buoys) => info!("Loaded {} buoys", buoys.len()),
            Err(e) => error!("Failed to fetch buoy list: {}", e),
        }
        self.buoys = Loadable::from_result(result);
        true
    }

    // ─── Selection ───

    /// Toggle a buoy and return the fetch the new selection needs, if any.
    pub fn toggle_buoy(&mut self, serial: &str) -> Option<MeasurementRequest> {
        self.selection.toggle(serial);
        self.selection_changed()
    }

    /// Replace the whole selection (e.g. "clear all").
    pub fn set_selection(&mut self, selection: Selection) -> Option<MeasurementRequest> {
        self.selection = selection;
        self.selection_changed()
    }

    /// Any in-flight request is superseded. An empty selection issues no
    /// request and clears the charts.
    fn selection_changed(&mut self) -> Option<MeasurementRequest> {
        self.generation += 1;
        if self.selection.is_empty() {
            self.measurements = Loadable::Idle;
            return None;
        }
        self.measurements = Loadable::Loading;
        Some(MeasurementRequest {
            generation: self.generation,
            serial_numbers: self.selection.serial_numbers(),
        })
    }

    pub fn is_current(&self, request: &MeasurementRequest) -> bool {
        request.generation == self.generation
    }

    /// Apply a measurement fetch outcome. Returns false, leaving state
    /// untouched, when `request` has been superseded.
    pub fn finish_measurement_fetch(
        &mut self,
        request: &MeasurementRequest,
        result: Result<Vec<Measurement>, FetchError>,
    ) -> bool {
        if !self.is_current(request) {
            debug!(
                "Dropping stale measurements for [{}] (generation {} < {})",
                request.query_value(),
                request.generation,
                self.generation
            );
            return false;
        }
        match &result {
            Ok(measurements) => info!(
                "Loaded {} measurements for [{}]",
                measurements.len(),
                request.query_value()
            ),
            Err(e) => error!(
                "Failed to fetch measurements for [{}]: {}",
                request.query_value(),
                e
            ),
        }
        self.measurements = Loadable::from_result(result);
        true
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
    }

    /// Drop all fetched data and the selection, superseding anything in flight.
    pub fn reset(&mut self) {
        *self = DashboardStore {
            generation: self.generation + 1,
            buoy_generation: self.buoy_generation + 1,
            ..DashboardStore::default()
        };
    }

    // ─── Derived views ───

    /// Loaded measurements inside the date filter, with dates read in `tz`.
    /// Empty while loading or failed.
    pub fn visible_measurements<Tz: TimeZone>(&self, tz: &Tz) -> Vec<&Measurement> {
        self.measurements
            .data()
            .map(|all| {
                all.iter()
                    .filter(|m| self.date_range.contains(&m.timestamp, tz))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn chart_series<Tz: TimeZone>(&self, dimension: Dimension, tz: &Tz) -> Vec<ChartPoint>
    where
        Tz::Offset: Display,
    {
        chart::series(self.visible_measurements(tz), dimension, tz)
    }

    /// Buoy list panel rows, in API order.
    pub fn buoy_entries<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Vec<BuoyEntry>
    where
        Tz::Offset: Display,
    {
        self.buoys
            .data()
            .map(|buoys| {
                buoys
                    .iter()
                    .map(|buoy| BuoyEntry {
                        serial_number: buoy.serial_number.clone(),
                        label: buoy.label(),
                        active: activity::is_active(buoy, now),
                        selected: self.selection.contains(&buoy.serial_number),
                        last_active: format::last_active(buoy.last_measurement_timestamp.as_ref(), tz),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn map_view<Tz: TimeZone>(&self, tz: &Tz) -> MapView
    where
        Tz::Offset: Display,
    {
        let buoys = self.buoys.data().map(Vec::as_slice).unwrap_or(&[]);
        map::view(buoys, tz)
    }
}

/// Shared, mutable access to a [`DashboardStore`].
///
/// The data-access layer is written against this trait so it can drive a
/// plain `Rc<RefCell<_>>` in tests and a Dioxus signal in the browser.
/// Implementations must not hold the borrow across an `.await`.
pub trait StoreHandle {
    fn update<R>(&self, f: impl FnOnce(&mut DashboardStore) -> R) -> R;

    fn read<R>(&self, f: impl FnOnce(&DashboardStore) -> R) -> R {
        self.update(|store| f(store))
    }
}

impl StoreHandle for Rc<RefCell<DashboardStore>> {
    fn update<R>(&self, f: impl FnOnce(&mut DashboardStore) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn read<R>(&self, f: impl FnOnce(&DashboardStore) -> R) -> R {
        f(&self.borrow())
    }
}
