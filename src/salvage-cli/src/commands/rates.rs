//! Rates command handlers
//!
//! Shows the effective expected-rate table, bundled defaults plus any
//! user overrides.

use anyhow::Result;
use salvage::SalvageKind;

use crate::commands::open_tracker;

/// Handle the rates command
pub fn handle(kind: Option<SalvageKind>) -> Result<()> {
    let tracker = open_tracker()?;
    let rates = tracker.rates();

    let kinds: Vec<SalvageKind> = match kind {
        Some(kind) => vec![kind],
        None => SalvageKind::known().collect(),
    };

    let mut printed = false;
    for kind in kinds {
        let Some(items) = rates.kind_items(kind) else {
            continue;
        };
        if items.is_empty() {
            continue;
        }
        printed = true;

        println!("{}", kind.label());
        let mut entries: Vec<(&String, &f64)> = items.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (name, rate) in entries {
            println!("  {:<28} {:>5.1}%", name, rate * 100.0);
        }
        println!();
    }

    if !printed {
        println!("No drop rates known.");
    }

    Ok(())
}
