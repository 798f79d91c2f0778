//! Core types and client-side state for the BitBuoy dashboard.
//!
//! Nothing in this crate performs I/O. The fetch layer lives in
//! `bitbuoy-api`, rendering lives in `bitbuoy-ui`; both drive the
//! [`store::DashboardStore`] defined here.

pub mod activity;
pub mod buoy;
pub mod chart;
pub mod date_range;
pub mod error;
pub mod format;
pub mod map;
pub mod measurement;
pub mod selection;
pub mod store;
pub mod timestamp;
