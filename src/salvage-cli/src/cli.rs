//! CLI argument definitions for salvage
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use salvage::SalvageKind;

#[derive(Parser)]
#[command(name = "salvage")]
#[command(about = "Salvage loot tracker - drop statistics and pirate rank", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest chat lines from a file or stdin
    #[command(visible_alias = "i")]
    Ingest {
        /// Path to a chat log (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Only print the end-of-run summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show tracked salvage statistics
    #[command(visible_alias = "s")]
    Stats {
        /// Restrict output to one salvage kind (e.g. "small", "martial")
        #[arg(short, long)]
        kind: Option<SalvageKind>,

        /// Column to sort items by
        #[arg(long, value_enum, default_value_t = SortOrder::Name)]
        sort: SortOrder,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show pirate rank progression
    #[command(visible_alias = "r")]
    Rank,

    /// Show the effective expected drop rates
    Rates {
        /// Restrict output to one salvage kind
        #[arg(short, long)]
        kind: Option<SalvageKind>,
    },

    /// Clear tracked statistics
    Reset {
        /// Reset one salvage kind
        #[arg(short, long, conflicts_with = "all")]
        kind: Option<SalvageKind>,

        /// Reset every kind
        #[arg(long)]
        all: bool,

        /// Also restart rank progression (requires --all)
        #[arg(long, requires = "all")]
        ranks: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Enable or disable pirate rank progression
        #[arg(long)]
        enable_ranks: Option<bool>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// Sort orders for the stats table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Item name
    Name,
    /// Observed drop rate
    Rate,
    /// Expected drop rate
    Expected,
    /// Total quantity received
    Quantity,
}
