//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up salvage CLI defaults.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;

/// Handle the configure command
pub fn handle(data_dir: Option<PathBuf>, enable_ranks: Option<bool>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config)?;
        return Ok(());
    }

    if data_dir.is_none() && enable_ranks.is_none() {
        show_usage();
        return Ok(());
    }

    if let Some(dir) = data_dir {
        println!("Data directory configured: {}", dir.display());
        config.data_dir = Some(dir);
    }

    if let Some(enabled) = enable_ranks {
        println!(
            "Pirate rank progression {}",
            if enabled { "enabled" } else { "disabled" }
        );
        config.enable_ranks = Some(enabled);
    }

    config.save()?;
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) -> Result<()> {
    match &config.data_dir {
        Some(dir) => println!("Data directory: {}", dir.display()),
        None => println!(
            "Data directory: {} (default)",
            config.resolve_data_dir()?.display()
        ),
    }

    println!(
        "Pirate ranks:   {}",
        if config.ranks_enabled() { "enabled" } else { "disabled" }
    );

    if let Ok(path) = Config::config_path() {
        println!("Config file:    {}", path.display());
    }

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: salvage configure --data-dir PATH");
    println!("   or: salvage configure --enable-ranks true|false");
    println!("   or: salvage configure --show");
    println!();
    println!("Note: tracked stats, rank data, and the editable drop rate");
    println!("      table all live in the data directory.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        // Just verify it doesn't panic
        show_usage();
    }

    #[test]
    fn test_config_path_exists() {
        // Config::config_path() should return a valid path
        let result = Config::config_path();
        assert!(result.is_ok());
    }

    #[test]
    fn test_ranks_enabled_defaults_on() {
        let config = Config::default();
        assert!(config.ranks_enabled());
    }
}
