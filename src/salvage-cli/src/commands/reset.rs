//! Reset command handlers
//!
//! Clears tracked statistics, optionally including rank progression.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use salvage::SalvageKind;

use crate::commands::open_tracker;

/// Handle the reset command
pub fn handle(kind: Option<SalvageKind>, all: bool, ranks: bool, yes: bool) -> Result<()> {
    if kind.is_none() && !all {
        bail!("Nothing to reset: pass --kind <KIND> or --all");
    }

    let what = match kind {
        Some(kind) => format!("statistics for {} salvage", kind.label()),
        None if ranks => "all statistics and rank progression".to_string(),
        None => "all statistics".to_string(),
    };

    if !yes && !confirm(&format!("Reset {}?", what))? {
        println!("Aborted.");
        return Ok(());
    }

    let mut tracker = open_tracker()?;
    match kind {
        Some(kind) => {
            if tracker.reset_kind(kind)? {
                println!("Reset {}.", what);
            } else {
                println!("Nothing tracked for {} salvage.", kind.label());
            }
        }
        None => {
            tracker.reset_stats()?;
            if ranks {
                tracker.reset_progress()?;
            }
            println!("Reset {}.", what);
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
