//! Command implementations for the BitBuoy CLI.
//!
//! Provides subcommands for listing the buoy fleet, checking which buoys are
//! reporting, and exporting measurements to CSV.

use bitbuoy_api::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_ID};
use bitbuoy_api::native::HttpClient;
use bitbuoy_api::{ApiConfig, Credentials};
use bitbuoy_core::date_range::DateRange;
use bitbuoy_core::store::DashboardStore;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub mod buoys;
pub mod measurements;

/// Connection settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the BitBuoy API
    #[arg(long, global = true, env = "BITBUOY_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Owner of the buoy fleet
    #[arg(long, global = true, env = "BITBUOY_USER_ID", default_value_t = DEFAULT_USER_ID)]
    pub user_id: u64,

    /// Pre-issued API token (takes precedence over username/password)
    #[arg(long, global = true, env = "BITBUOY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, global = true, env = "BITBUOY_USERNAME")]
    pub username: Option<String>,

    #[arg(long, global = true, env = "BITBUOY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "BITBUOY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl ApiArgs {
    pub fn config(&self) -> ApiConfig {
        let credentials = Credentials::from_parts(
            self.token.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        );
        ApiConfig::new(self.api_url.as_str(), self.user_id, credentials)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the buoys with their activity and position
    Buoys,

    /// Export measurements for one or more buoys as CSV
    Measurements {
        /// Comma-separated buoy serial numbers, e.g. B001,B002
        #[arg(short, long, value_delimiter = ',', required = true)]
        serials: Vec<String>,

        /// Output CSV path (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Keep measurements on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Keep measurements on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Count active and inactive buoys
    Status,
}

pub(crate) type SharedStore = Rc<RefCell<DashboardStore>>;

pub async fn run(api: ApiArgs, command: Command) -> anyhow::Result<()> {
    let config = api.config();
    log::debug!("Using {:?}", config);
    let client = HttpClient::new(config)?;
    let store: SharedStore = Rc::new(RefCell::new(DashboardStore::new()));

    match command {
        Command::Buoys => buoys::run_buoys(&client, &store).await,
        Command::Measurements {
            serials,
            output,
            from,
            to,
        } => {
            measurements::run_measurements(
                &client,
                &store,
                &serials,
                output.as_deref(),
                DateRange::new(from, to),
            )
            .await
        }
        Command::Status => buoys::run_status(&client, &store).await,
    }
}
