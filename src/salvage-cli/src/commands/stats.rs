//! Stats command handlers
//!
//! Displays tracked salvage statistics with observed and expected rates.

use anyhow::Result;
use salvage::{ItemSummary, SalvageKind};

use crate::cli::SortOrder;
use crate::commands::open_tracker;

/// Handle the stats command
pub fn handle(kind: Option<SalvageKind>, sort: SortOrder, desc: bool) -> Result<()> {
    let tracker = open_tracker()?;
    let mut rows = tracker.snapshot();

    if let Some(kind) = kind {
        rows.retain(|row| row.kind == kind);
    }

    if rows.is_empty() {
        match kind {
            Some(kind) => println!("Nothing tracked for {} salvage yet.", kind.label()),
            None => println!("No salvage tracked yet."),
        }
        return Ok(());
    }

    for row in &mut rows {
        sort_items(&mut row.items, sort, desc);

        println!(
            "{} - {} events (last {})",
            row.kind.label(),
            row.total_events,
            row.last_updated.format("%Y-%m-%d %H:%M")
        );
        println!(
            "  {:<28} {:>6} {:>8} {:>8} {:>9}  {}",
            "Item", "Drops", "Qty", "Seen", "Expected", "Luck"
        );
        for item in &row.items {
            println!(
                "  {:<28} {:>6} {:>8} {:>7.1}% {:>8.1}%  {}",
                item.name,
                item.drops,
                item.quantity,
                item.observed_rate * 100.0,
                item.expected_rate * 100.0,
                item.luck.label()
            );
        }
        println!();
    }

    Ok(())
}

fn sort_items(items: &mut [ItemSummary], sort: SortOrder, desc: bool) {
    match sort {
        SortOrder::Name => {
            items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortOrder::Rate => items.sort_by(|a, b| a.observed_rate.total_cmp(&b.observed_rate)),
        SortOrder::Expected => items.sort_by(|a, b| a.expected_rate.total_cmp(&b.expected_rate)),
        SortOrder::Quantity => items.sort_by_key(|item| item.quantity),
    }
    if desc {
        items.reverse();
    }
}
