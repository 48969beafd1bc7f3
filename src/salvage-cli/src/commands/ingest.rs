//! Ingest command handlers
//!
//! Feeds chat lines from a file or stdin through the tracker.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::open_tracker;

/// Handle the ingest command
pub fn handle(file: Option<&Path>, quiet: bool) -> Result<()> {
    let mut tracker = open_tracker()?;

    let reader: Box<dyn BufRead> = match file {
        Some(path) => {
            tracing::debug!("Reading chat lines from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => {
            tracing::debug!("Reading chat lines from stdin");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let mut lines_read = 0u64;
    let mut events = 0u64;
    let mut value_gained = 0u64;

    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        lines_read += 1;

        let Some(outcome) = tracker.ingest_line(&line) else {
            continue;
        };
        events += 1;
        value_gained += outcome.value_gained;

        if !quiet {
            let gained = if outcome.value_gained > 0 {
                format!("  (+{} gp)", outcome.value_gained)
            } else {
                String::new()
            };
            println!(
                "{:<10} {} x {}{}",
                outcome.event.kind.label(),
                outcome.event.quantity,
                outcome.event.item_name,
                gained
            );
        }

        if outcome.ranked_up {
            let tier = tracker.progress().current();
            println!("Rank up! Now rank {}: {} ({})", tier.rank, tier.name, tier.description);
            tracker.acknowledge_rank_up();
        }
    }

    println!(
        "Processed {} lines: {} salvage events, {} gp looted",
        lines_read, events, value_gained
    );

    Ok(())
}
