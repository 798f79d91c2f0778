//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use bitbuoy_core::store::{DashboardStore, StoreHandle};
use dioxus::core::Task;
use dioxus::prelude::*;

/// Shared application state for the dashboard page.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Buoys, measurements, selection and date filter
    pub store: Signal<DashboardStore>,
    /// The buoy-list fetch currently in flight, cancelled on sign-out
    pub buoy_task: Signal<Option<Task>>,
    /// The measurement fetch currently in flight, cancelled when superseded
    pub measurement_task: Signal<Option<Task>>,
    /// Operator signed in through the header form
    pub username: Signal<Option<String>>,
    /// Whether the buoy selector dropdown is open
    pub selector_open: Signal<bool>,
    /// Whether the user menu is open
    pub user_menu_open: Signal<bool>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            store: Signal::new(DashboardStore::new()),
            buoy_task: Signal::new(None),
            measurement_task: Signal::new(None),
            username: Signal::new(None),
            selector_open: Signal::new(false),
            user_menu_open: Signal::new(false),
        }
    }

    pub fn store_handle(&self) -> SignalStore {
        SignalStore(self.store)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Lets `bitbuoy_api::sync` drive the store signal.
///
/// Each call takes and releases the signal lock, so no borrow is held
/// across the fetch's `.await`.
#[derive(Clone, Copy)]
pub struct SignalStore(pub Signal<DashboardStore>);

impl StoreHandle for SignalStore {
    fn update<R>(&self, f: impl FnOnce(&mut DashboardStore) -> R) -> R {
        let mut signal = self.0;
        let mut store = signal.write();
        f(&mut store)
    }

    fn read<R>(&self, f: impl FnOnce(&DashboardStore) -> R) -> R {
        let store = self.0.read();
        f(&store)
    }
}
