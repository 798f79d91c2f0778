//! Reusable Dioxus RSX components for the BitBuoy dashboard.

mod buoy_list;
mod buoy_selector;
mod chart_container;
mod chart_header;
mod date_range_picker;
mod error_display;
mod header;
mod loading_spinner;
mod map_panel;
mod measurement_chart;

pub use buoy_list::BuoyList;
pub use buoy_selector::BuoySelector;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use header::DashboardHeader;
pub use loading_spinner::LoadingSpinner;
pub use map_panel::MapPanel;
pub use measurement_chart::MeasurementChart;
