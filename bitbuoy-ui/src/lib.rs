//! Dioxus components and browser glue for the BitBuoy dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js chart and Leaflet map via `js_sys::eval()`
//! - `state`: `AppState` with the reactive dashboard store
//! - `actions`: event handlers that spawn fetches through `bitbuoy_api::sync`
//! - `components`: the RSX building blocks of the dashboard page

pub mod actions;
pub mod components;
pub mod js_bridge;
pub mod state;
