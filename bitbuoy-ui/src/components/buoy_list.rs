//! Scrollable buoy list with active and selection indicators.

use crate::actions::{self, Api};
use crate::components::{ErrorDisplay, LoadingSpinner};
use crate::state::AppState;
use bitbuoy_core::store::Loadable;
use chrono::{Local, Utc};
use dioxus::prelude::*;

#[component]
pub fn BuoyList() -> Element {
    let state = use_context::<AppState>();
    let api = use_context::<Api>();

    let store = state.store.read();
    // Active status is recomputed on every render against the current clock.
    let entries = store.buoy_entries(Utc::now(), &Local);
    let status = match store.buoys() {
        Loadable::Idle => Some(None),
        Loadable::Loading => Some(Some("Loading buoys...".to_string())),
        _ => None,
    };
    let error = store.buoys().error().map(str::to_string);
    drop(store);
    let signed_in = state.username.read().is_some();

    rsx! {
        div {
            style: "height: 100%; overflow-y: auto;",
            if let Some(message) = error {
                ErrorDisplay { title: "Could not load buoys".to_string(), message }
            }
            match status {
                Some(Some(message)) => rsx! { LoadingSpinner { message } },
                Some(None) if signed_in => rsx! {
                    div {
                        style: "padding: 12px; color: #888; display: flex; justify-content: space-between; align-items: center;",
                        "No buoys loaded."
                        button {
                            style: "border: 1px solid #ddd; border-radius: 4px; background: white; padding: 4px 10px; cursor: pointer;",
                            onclick: {
                                let api = api.clone();
                                move |_| actions::load_buoys(state, api.clone())
                            },
                            "Reload buoys"
                        }
                    }
                },
                Some(None) => rsx! {
                    div { style: "padding: 12px; color: #888;", "Sign in to see your buoys." }
                },
                None => rsx! {},
            }
            for entry in entries {
                button {
                    key: "{entry.serial_number}",
                    style: "display: flex; align-items: center; width: 100%; padding: 8px; margin-bottom: 4px; border: none; border-radius: 4px; text-align: left; cursor: pointer;",
                    background: if entry.selected { "#E3F2FD" } else { "transparent" },
                    onclick: {
                        let api = api.clone();
                        let serial = entry.serial_number.clone();
                        move |_| actions::toggle_buoy(state, api.clone(), serial.clone())
                    },
                    div {
                        title: if entry.active { "Active" } else { "Inactive" },
                        style: "width: 8px; height: 8px; border-radius: 50%; margin-right: 10px; flex-shrink: 0;",
                        background: if entry.active { "#4CAF50" } else { "#BDBDBD" },
                    }
                    div {
                        p { style: "margin: 0; font-weight: 500;", "{entry.label}" }
                        p { style: "margin: 0; font-size: 13px; color: #666;", "Last active: {entry.last_active}" }
                    }
                    if entry.selected {
                        span { style: "margin-left: auto; color: #1565C0; font-size: 12px;", "selected" }
                    }
                }
            }
        }
    }
}
