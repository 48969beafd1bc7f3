//! Command handlers for the salvage CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod ingest;
pub mod rank;
pub mod rates;
pub mod reset;
pub mod stats;

use anyhow::Result;
use salvage::{JsonItemCatalog, Tracker};

use crate::config::Config;

/// Open the tracker against the configured data directory.
pub fn open_tracker() -> Result<Tracker<JsonItemCatalog>> {
    let config = Config::load()?;
    let data_dir = config.resolve_data_dir()?;
    let catalog = JsonItemCatalog::load(&data_dir);
    Ok(Tracker::open(&data_dir, catalog, config.ranks_enabled()))
}
