//! Event pipeline orchestration
//!
//! Ties the whole tracking flow together behind one type: strip markup,
//! classify, resolve the item, record stats, credit looted value, persist.
//! Hosts feed raw chat lines in one at a time and read display snapshots
//! back out.

use std::path::Path;

use tracing::warn;

use crate::category::SalvageKind;
use crate::classify::{classify, strip_markup, LootEvent};
use crate::items::{fallback_item_id, ItemResolver, ResolvedItem, MAX_EVENT_QUANTITY};
use crate::progress::RankProgress;
use crate::rates::DropRateTable;
use crate::stats::{KindSummary, SalvageLedger};
use crate::store::{SalvageStore, StoreError};

/// What one ingested line did to the tracked state.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub event: LootEvent,
    pub item_id: u32,
    /// Looted gp credited toward rank progression by this event.
    pub value_gained: u64,
    /// True when this event pushed the pirate rank up.
    pub ranked_up: bool,
}

/// Full tracking pipeline bound to one data directory.
pub struct Tracker<R> {
    store: SalvageStore,
    ledger: SalvageLedger,
    progress: RankProgress,
    rates: DropRateTable,
    resolver: R,
    ranks_enabled: bool,
}

impl<R: ItemResolver> Tracker<R> {
    /// Open the tracker, loading and migrating any persisted state.
    pub fn open(data_dir: &Path, resolver: R, ranks_enabled: bool) -> Self {
        let store = SalvageStore::new(data_dir);
        let ledger = store.load_ledger();
        let progress = store.load_progress();
        let rates = DropRateTable::load(data_dir);
        Self {
            store,
            ledger,
            progress,
            rates,
            resolver,
            ranks_enabled,
        }
    }

    /// Ingest one raw chat line.
    ///
    /// Returns `None` for lines that are not salvage hauls. Both documents
    /// are saved after every accepted event; save failures are logged and
    /// do not interrupt ingestion.
    pub fn ingest_line(&mut self, raw: &str) -> Option<IngestOutcome> {
        let line = strip_markup(raw);
        let event = classify(&line)?;

        let resolved = self.resolver.resolve(&event.item_name);
        let item_id = match resolved {
            Some(item) => item.id,
            None => fallback_item_id(&event.item_name),
        };

        let expected = self.rates.expected_rate(event.kind, &event.item_name);
        self.ledger
            .record(event.kind, item_id, &event.item_name, expected, event.quantity);
        if let Err(e) = self.store.save_ledger(&self.ledger) {
            warn!("Failed to save stats: {}", e);
        }

        let mut value_gained = 0;
        let mut ranked_up = false;
        if self.ranks_enabled {
            value_gained = event_value(resolved, event.quantity);
            if value_gained > 0 {
                ranked_up = self.progress.add_value(value_gained);
                if let Err(e) = self.store.save_progress(&self.progress) {
                    warn!("Failed to save rank progression: {}", e);
                }
            }
        }

        Some(IngestOutcome {
            event,
            item_id,
            value_gained,
            ranked_up,
        })
    }

    /// Display rows for everything tracked, luck computed against the
    /// live rate table.
    pub fn snapshot(&self) -> Vec<KindSummary> {
        self.ledger.snapshot(&self.rates)
    }

    pub fn ledger(&self) -> &SalvageLedger {
        &self.ledger
    }

    pub fn progress(&self) -> &RankProgress {
        &self.progress
    }

    pub fn rates(&self) -> &DropRateTable {
        &self.rates
    }

    pub fn ranks_enabled(&self) -> bool {
        self.ranks_enabled
    }

    /// Clear the pending rank-up announcement once it has been shown.
    pub fn acknowledge_rank_up(&mut self) {
        self.progress.acknowledge_rank_up();
    }

    /// Drop stats for one kind. Returns true when anything was removed.
    pub fn reset_kind(&mut self, kind: SalvageKind) -> Result<bool, StoreError> {
        let removed = self.ledger.reset_kind(kind);
        if removed {
            self.store.save_ledger(&self.ledger)?;
        }
        Ok(removed)
    }

    /// Drop all stats, leaving rank progression alone.
    pub fn reset_stats(&mut self) -> Result<(), StoreError> {
        self.ledger.reset_all();
        self.store.save_ledger(&self.ledger)
    }

    /// Restart rank progression from the bottom of the ladder.
    pub fn reset_progress(&mut self) -> Result<(), StoreError> {
        self.progress = RankProgress::new();
        self.store.save_progress(&self.progress)
    }
}

/// Looted value for one event. Zero when the item has no known value or
/// the quantity fails the sanity cap, so corrupted lines cannot inflate
/// progression.
fn event_value(resolved: Option<ResolvedItem>, quantity: u32) -> u64 {
    let Some(item) = resolved else {
        return 0;
    };
    if item.high_alch == 0 || quantity == 0 || quantity > MAX_EVENT_QUANTITY {
        return 0;
    }
    u64::from(item.high_alch) * u64::from(quantity)
}
