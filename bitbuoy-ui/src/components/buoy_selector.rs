//! Dropdown with one checkbox per buoy.

use crate::actions::{self, Api};
use crate::state::AppState;
use bitbuoy_core::store::Loadable;
use dioxus::prelude::*;

/// Multi-select buoy dropdown. Each change triggers a measurement fetch.
#[component]
pub fn BuoySelector() -> Element {
    let mut state = use_context::<AppState>();
    let api = use_context::<Api>();

    let store = state.store.read();
    let label = store.selection().selector_label();
    let options: Vec<(String, String, bool)> = match store.buoys() {
        Loadable::Loaded(buoys) => buoys
            .iter()
            .map(|b| (b.serial_number.clone(), b.label(), store.selection().contains(&b.serial_number)))
            .collect(),
        _ => Vec::new(),
    };
    drop(store);
    let open = (state.selector_open)();

    rsx! {
        div {
            style: "position: relative;",
            button {
                style: "padding: 6px 14px; border: 1px solid #ddd; border-radius: 6px; background: white; cursor: pointer; font-size: 14px;",
                onclick: move |_| {
                    let open = (state.selector_open)();
                    state.selector_open.set(!open);
                },
                "{label}"
            }
            if open {
                div {
                    style: "position: absolute; top: 38px; left: 0; min-width: 180px; max-height: 320px; overflow-y: auto; background: white; border: 1px solid #ddd; border-radius: 6px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); z-index: 1000; padding: 4px 0;",
                    if options.is_empty() {
                        div { style: "padding: 8px 12px; color: #888;", "No buoys available" }
                    }
                    for (serial, text, checked) in options {
                        label {
                            key: "{serial}",
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 12px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onchange: {
                                    let api = api.clone();
                                    move |_| actions::toggle_buoy(state, api.clone(), serial.clone())
                                },
                            }
                            "{text}"
                        }
                    }
                }
            }
        }
    }
}
