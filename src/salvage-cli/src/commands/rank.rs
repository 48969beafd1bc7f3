//! Rank command handlers
//!
//! Shows the current pirate rank and progress toward the next one.

use anyhow::Result;

use crate::commands::open_tracker;

/// Handle the rank command
pub fn handle() -> Result<()> {
    let tracker = open_tracker()?;
    let progress = tracker.progress();
    let tier = progress.current();

    println!("Rank {} of 100: {} ({})", tier.rank, tier.name, tier.description);
    println!("Total booty: {} gp", progress.total_value());

    match progress.next() {
        Some(next) => {
            let fraction = progress.progress();
            println!(
                "Next rank: {} at {} gp ({} gp to go)",
                next.name,
                next.threshold,
                progress.value_to_next_rank()
            );
            println!("[{}] {:.1}%", progress_bar(fraction, 40), fraction * 100.0);
        }
        None => println!("Top of the ladder."),
    }

    if !tracker.ranks_enabled() {
        println!("Rank progression is disabled; enable it with `salvage configure --enable-ranks true`.");
    }

    Ok(())
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width);
    for i in 0..width {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar
}
