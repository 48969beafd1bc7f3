//! Salvage statistics aggregation
//!
//! Per-kind, per-item tallies of everything looted. Two counters are kept
//! apart on purpose: `drops` counts events an item appeared in, `quantity`
//! sums the units those events carried. Observed rates divide drops by the
//! kind's event total, never by quantity.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::category::SalvageKind;
use crate::luck::{luck_ratio, LuckBand};
use crate::rates::DropRateTable;

/// Tracking data for one item within a salvage kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStat {
    pub item_id: u32,
    pub name: String,
    /// Number of loot events this item appeared in.
    pub drops: u64,
    /// Total units received across those events.
    pub quantity: u64,
    /// Expected rate seen when the item was first recorded. Persisted for
    /// continuity; live lookups go back to the rate table.
    pub expected_rate: f64,
}

/// All tracking data for one salvage kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KindStats {
    /// Loot events recorded against this kind.
    pub total_events: u64,
    /// When this kind last saw an event. Drives display ordering.
    pub last_updated: DateTime<Utc>,
    pub items: HashMap<u32, ItemStat>,
}

impl KindStats {
    pub fn new() -> Self {
        Self {
            total_events: 0,
            last_updated: Utc::now(),
            items: HashMap::new(),
        }
    }
}

impl Default for KindStats {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Ledger
// ============================================================================

/// In-memory aggregate of all recorded salvage events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalvageLedger {
    kinds: HashMap<SalvageKind, KindStats>,
}

impl SalvageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted kind stats.
    pub fn from_kinds(kinds: HashMap<SalvageKind, KindStats>) -> Self {
        Self { kinds }
    }

    /// Record one loot event.
    ///
    /// `expected_rate` seeds the stored snapshot the first time an item is
    /// seen and is left alone afterwards. Quantities below one are treated
    /// as one so the unit sum can never trail the event count.
    pub fn record(
        &mut self,
        kind: SalvageKind,
        item_id: u32,
        name: &str,
        expected_rate: f64,
        quantity: u32,
    ) {
        let quantity = quantity.max(1);
        let stats = self.kinds.entry(kind).or_default();
        stats.total_events += 1;
        stats.last_updated = Utc::now();

        let item = stats.items.entry(item_id).or_insert_with(|| ItemStat {
            item_id,
            name: name.to_string(),
            drops: 0,
            quantity: 0,
            expected_rate,
        });
        item.drops += 1;
        item.quantity += u64::from(quantity);
    }

    /// Observed per-event rate for an item, 0.0 when nothing is recorded.
    pub fn observed_rate(&self, kind: SalvageKind, item_id: u32) -> f64 {
        let Some(stats) = self.kinds.get(&kind) else {
            return 0.0;
        };
        if stats.total_events == 0 {
            return 0.0;
        }
        match stats.items.get(&item_id) {
            Some(item) => item.drops as f64 / stats.total_events as f64,
            None => 0.0,
        }
    }

    pub fn kind(&self, kind: SalvageKind) -> Option<&KindStats> {
        self.kinds.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SalvageKind, &KindStats)> {
        self.kinds.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Drop all data for one kind. Returns true when anything was removed.
    pub fn reset_kind(&mut self, kind: SalvageKind) -> bool {
        self.kinds.remove(&kind).is_some()
    }

    pub fn reset_all(&mut self) {
        self.kinds.clear();
    }

    /// Copy-on-read display rows.
    ///
    /// Kinds come back most-recently-active first; items within a kind are
    /// sorted by name. Expected rates and luck are looked up live in the
    /// given rate table.
    pub fn snapshot(&self, rates: &DropRateTable) -> Vec<KindSummary> {
        let mut kinds: Vec<KindSummary> = self
            .kinds
            .iter()
            .map(|(kind, stats)| {
                let mut items: Vec<ItemSummary> = stats
                    .items
                    .values()
                    .map(|item| {
                        let observed = if stats.total_events == 0 {
                            0.0
                        } else {
                            item.drops as f64 / stats.total_events as f64
                        };
                        let expected = rates.expected_rate(*kind, &item.name);
                        ItemSummary {
                            item_id: item.item_id,
                            name: item.name.clone(),
                            drops: item.drops,
                            quantity: item.quantity,
                            observed_rate: observed,
                            expected_rate: expected,
                            luck: LuckBand::from_ratio(luck_ratio(observed, expected)),
                        }
                    })
                    .collect();
                items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

                KindSummary {
                    kind: *kind,
                    total_events: stats.total_events,
                    last_updated: stats.last_updated,
                    items,
                }
            })
            .collect();

        kinds.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        kinds
    }
}

/// Display row for one salvage kind.
#[derive(Debug, Clone)]
pub struct KindSummary {
    pub kind: SalvageKind,
    pub total_events: u64,
    pub last_updated: DateTime<Utc>,
    pub items: Vec<ItemSummary>,
}

/// Display row for one item, with live rate comparisons baked in.
#[derive(Debug, Clone)]
pub struct ItemSummary {
    pub item_id: u32,
    pub name: String,
    pub drops: u64,
    pub quantity: u64,
    pub observed_rate: f64,
    pub expected_rate: f64,
    pub luck: LuckBand,
}
