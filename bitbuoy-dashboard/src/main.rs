//! BitBuoy dashboard
//!
//! Single page showing the operator's fleet of sensor buoys:
//! 1. On mount: load the D3.js/Leaflet scripts. Signing in from the header
//!    stores the credentials in the client and fetches the buoy list.
//! 2. Toggling a buoy (selector or list) refetches measurements for the
//!    whole selection; the four charts and the map re-render from the store.
//! 3. The date range only filters what is already loaded.

use bitbuoy_api::web::WebClient;
use bitbuoy_api::ApiConfig;
use bitbuoy_core::measurement::Dimension;
use bitbuoy_ui::actions::{self, Api};
use bitbuoy_ui::components::{
    BuoyList, BuoySelector, ChartHeader, DashboardHeader, DateRangePicker, ErrorDisplay, MapPanel,
    MeasurementChart,
};
use bitbuoy_ui::js_bridge;
use bitbuoy_ui::state::AppState;
use dioxus::prelude::*;
use log::info;
use std::rc::Rc;

const CARD_STYLE: &str =
    "border: 1px solid #e0e0e0; border-radius: 8px; padding: 12px; margin-bottom: 12px;";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("bitbuoy-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let api: Api = use_context_provider(|| Rc::new(WebClient::new(ApiConfig::from_build_env())));

    let mount_api = api.clone();
    use_hook(move || {
        info!("Connecting to {}", mount_api.config().base_url);
        js_bridge::init_scripts();
    });

    let username = state.username.read().clone();
    let measurement_error = state.store.read().measurements().error().map(str::to_string);
    let sign_in_api = api.clone();
    let sign_out_api = api.clone();

    rsx! {
        div {
            style: "font-family: system-ui, -apple-system, sans-serif; min-height: 100vh;",

            DashboardHeader {
                username,
                open: (state.user_menu_open)(),
                on_toggle_menu: move |_| {
                    let open = (state.user_menu_open)();
                    state.user_menu_open.set(!open);
                },
                on_sign_in: move |(username, password): (String, String)| {
                    actions::sign_in(state, sign_in_api.clone(), username, password)
                },
                on_sign_out: move |_| actions::sign_out(state, sign_out_api.clone()),
            }

            main {
                style: "padding: 16px;",

                div {
                    style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; margin-bottom: 16px;",
                    BuoySelector {}
                    DateRangePicker {}
                }

                div {
                    style: "display: flex; gap: 16px; align-items: flex-start;",

                    div {
                        style: "flex: 0 0 60%; min-width: 0;",
                        if let Some(message) = measurement_error {
                            ErrorDisplay { title: "Could not load measurements".to_string(), message }
                        }
                        for dimension in Dimension::ALL {
                            MeasurementChart { key: "{dimension.key()}", dimension }
                        }
                    }

                    div {
                        style: "flex: 1; min-width: 0;",
                        div {
                            style: CARD_STYLE,
                            ChartHeader { title: "Buoy map".to_string() }
                            MapPanel {}
                        }
                        div {
                            style: CARD_STYLE,
                            ChartHeader { title: "Buoys".to_string() }
                            BuoyList {}
                        }
                    }
                }
            }
        }
    }
}
