//! Leaflet map of buoy positions.

use crate::components::ChartContainer;
use crate::js_bridge;
use crate::state::AppState;
use chrono::Local;
use dioxus::prelude::*;

const MAP_CONTAINER_ID: &str = "buoy-map";

#[component]
pub fn MapPanel() -> Element {
    let state = use_context::<AppState>();

    use_effect(move || {
        let view = state.store.read().map_view(&Local);
        js_bridge::render_map(MAP_CONTAINER_ID, &view);
    });

    let loading = state.store.read().buoys().is_loading();

    rsx! {
        ChartContainer {
            id: MAP_CONTAINER_ID.to_string(),
            loading,
            min_height: 320,
        }
    }
}
