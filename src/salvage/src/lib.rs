//! # salvage
//!
//! Loot tracking library for the Sailing skill's salvage mechanic.
//!
//! This library provides functionality to:
//! - Classify salvage chat lines into structured loot events
//! - Aggregate per-kind, per-item drop statistics with a luck signal
//! - Drive the hundred-rank pirate ladder from total looted value
//! - Persist everything as JSON documents that survive corruption
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use salvage::{JsonItemCatalog, Tracker};
//!
//! let data_dir = Path::new("/tmp/salvage-demo");
//! let catalog = JsonItemCatalog::load(data_dir);
//! let mut tracker = Tracker::open(data_dir, catalog, true);
//!
//! let line = "You sort through the Martial salvage and find: 1 x Adamant 2h sword.";
//! if let Some(outcome) = tracker.ingest_line(line) {
//!     println!(
//!         "{} x {} from {} salvage",
//!         outcome.event.quantity, outcome.event.item_name, outcome.event.kind
//!     );
//!     if outcome.ranked_up {
//!         println!("Ranked up to {}!", tracker.progress().current().name);
//!         tracker.acknowledge_rank_up();
//!     }
//! }
//! ```

pub mod category;
pub mod classify;
pub mod items;
pub mod luck;
pub mod progress;
pub mod rank;
pub mod rates;
pub mod stats;
pub mod store;
pub mod tracker;

// Re-export commonly used items
#[doc(inline)]
pub use category::{kind_by_token, kind_from_chat, kind_info, KindInfo, SalvageKind, SALVAGE_KINDS};
#[doc(inline)]
pub use classify::{classify, strip_markup, LootEvent};
#[doc(inline)]
pub use items::{fallback_item_id, ItemResolver, JsonItemCatalog, ResolvedItem};
#[doc(inline)]
pub use luck::{luck_ratio, LuckBand};
#[doc(inline)]
pub use progress::RankProgress;
#[doc(inline)]
pub use rank::{
    next_tier, progress_fraction, tier_by_rank, tier_for_value, value_to_next, RankTier,
    RANK_LADDER,
};
#[doc(inline)]
pub use rates::DropRateTable;
#[doc(inline)]
pub use stats::{ItemStat, ItemSummary, KindStats, KindSummary, SalvageLedger};
#[doc(inline)]
pub use store::{SalvageStore, StoreError};
#[doc(inline)]
pub use tracker::{IngestOutcome, Tracker};
