//! Client side of the BitBuoy measurement API.
//!
//! - `config`: base URL, user id and credentials
//! - `endpoints`: URL construction for each endpoint
//! - `auth`: session-token exchange and caching
//! - `client`: the [`BuoyApi`] trait every transport implements
//! - `native` (feature `native`): `reqwest` transport for the CLI
//! - `web` (feature `web`): browser `fetch` transport for the dashboard
//! - `sync`: actions that run a fetch and apply it to a `DashboardStore`

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod sync;

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "web")]
pub mod web;

pub use client::BuoyApi;
pub use config::{ApiConfig, Credentials};
