//! One card per measurement dimension.

use crate::components::{ChartContainer, ChartHeader};
use crate::js_bridge;
use crate::state::AppState;
use bitbuoy_core::chart::ChartConfig;
use bitbuoy_core::measurement::Dimension;
use bitbuoy_core::store::Loadable;
use chrono::Local;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MeasurementChartProps {
    pub dimension: Dimension,
}

/// Line chart of one dimension for every selected buoy, x-axis in HH:MM.
#[component]
pub fn MeasurementChart(props: MeasurementChartProps) -> Element {
    let state = use_context::<AppState>();
    let dimension = props.dimension;
    let container_id = format!("chart-{}", dimension.key().replace('_', "-"));

    // Re-runs whenever the store changes (new data, date filter). Empty
    // series go through the same queue so they clear in order.
    let effect_id = container_id.clone();
    use_effect(move || {
        let points = state.store.read().chart_series(dimension, &Local);
        js_bridge::render_line_chart(&effect_id, &points, &ChartConfig::for_dimension(dimension));
    });

    let store = state.store.read();
    let loading = store.measurements().is_loading();
    let empty_message = match store.measurements() {
        Loadable::Idle => Some("Select buoys to see measurements".to_string()),
        Loadable::Failed(_) => Some("Measurements unavailable".to_string()),
        Loadable::Loaded(_) if store.visible_measurements(&Local).is_empty() => {
            Some("No measurements in range".to_string())
        }
        _ => None,
    };
    drop(store);

    rsx! {
        div {
            style: "border: 1px solid #e0e0e0; border-radius: 8px; padding: 12px; margin-bottom: 12px;",
            ChartHeader {
                title: dimension.label().to_string(),
                unit: dimension.unit().to_string(),
            }
            ChartContainer {
                id: container_id,
                loading,
                empty_message,
                min_height: 200,
            }
        }
    }
}
