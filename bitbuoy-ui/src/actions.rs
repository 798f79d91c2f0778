//! Event handlers that start fetches.
//!
//! Components never touch the API directly: they call these functions, which
//! update the store synchronously and spawn the asynchronous part.

use crate::state::AppState;
use bitbuoy_api::sync;
use bitbuoy_api::web::WebClient;
use bitbuoy_api::{BuoyApi, Credentials};
use bitbuoy_core::store::{DashboardStore, StoreHandle};
use dioxus::core::Task;
use dioxus::prelude::*;
use log::info;
use std::rc::Rc;

/// The API client, provided once via `use_context_provider`.
pub type Api = Rc<WebClient>;

fn cancel(mut task: Signal<Option<Task>>) {
    if let Some(task) = task.write().take() {
        task.cancel();
    }
}

/// Fetch the buoy list. The list shows as loading before this returns.
pub fn load_buoys(mut state: AppState, api: Api) {
    cancel(state.buoy_task);
    let request = state.store_handle().update(DashboardStore::begin_buoy_fetch);
    let task = spawn(async move {
        sync::fetch_buoys(api.as_ref(), &state.store_handle(), request).await;
    });
    state.buoy_task.set(Some(task));
}

/// Exchange the operator's username/password for a session and load their buoys.
pub fn sign_in(mut state: AppState, api: Api, username: String, password: String) {
    info!("Signing in as {}", username);
    api.sign_in(Credentials::Session {
        username: username.clone(),
        password,
    });
    state.username.set(Some(username));
    load_buoys(state, api);
}

/// Toggle a buoy and fetch measurements for the new selection, cancelling
/// the fetch for the previous selection if it is still running.
pub fn toggle_buoy(mut state: AppState, api: Api, serial: String) {
    let request = state.store_handle().update(|s| s.toggle_buoy(&serial));
    cancel(state.measurement_task);

    if let Some(request) = request {
        let task = spawn(async move {
            sync::fetch_measurements(api.as_ref(), &state.store_handle(), request).await;
        });
        state.measurement_task.set(Some(task));
    }
}

/// Forget credentials, stop every fetch and clear the dashboard.
pub fn sign_out(mut state: AppState, api: Api) {
    cancel(state.buoy_task);
    cancel(state.measurement_task);
    sync::sign_out(api.as_ref(), &state.store_handle());
    state.username.set(None);
    state.user_menu_open.set(false);
    state.selector_open.set(false);
}
