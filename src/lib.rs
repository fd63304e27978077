//! LSCS member portal
//!
//! Backend for the portal's API key workflow:
//! - Key classification (development, production, admin) and origin policy
//! - Committee/position gating for requesting and managing keys
//! - Forwarding accepted requests to the LSCS core API, which mints the keys
//! - Member directory lookups

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::lscs::LscsClient;
use tracing::info;

/// Create the application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let lscs = LscsClient::from_config(&config.upstream)?;
    info!(base_url = %lscs.base_url(), "Configured LSCS core API client");

    Ok(AppState::new(lscs))
}
