//! JSON persistence for stats and rank progression
//!
//! Two documents live in the data directory: `stats.json` for the ledger
//! and `rank.json` for progression. Writes go through a temp file and
//! rename so a crash never leaves a half-written document. Unreadable
//! documents are set aside with a `.corrupt` suffix instead of being
//! overwritten, and loading always succeeds, worst case with fresh state.
//!
//! Earlier builds kept a different flat layout (`salvage-data.json` and
//! `pirate_rank.json`). Those are migrated once into the current format
//! and renamed with a `.migrated` suffix.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::category::{kind_by_token, SalvageKind};
use crate::progress::RankProgress;
use crate::stats::{ItemStat, KindStats, SalvageLedger};

pub const STATS_FILE: &str = "stats.json";
pub const RANK_FILE: &str = "rank.json";
const LEGACY_STATS_FILE: &str = "salvage-data.json";
const LEGACY_RANK_FILE: &str = "pirate_rank.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Document shapes
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct KindStatsDoc {
    #[serde(default)]
    total_events: u64,
    #[serde(default = "Utc::now")]
    last_updated: DateTime<Utc>,
    #[serde(default)]
    items: HashMap<String, ItemStatDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemStatDoc {
    name: String,
    #[serde(default)]
    drops: u64,
    #[serde(default)]
    quantity: u64,
    #[serde(default)]
    expected_rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RankDoc {
    total_value: u64,
    rank: u16,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyKindDoc {
    #[serde(default)]
    total_loots: u64,
    #[serde(default)]
    items: HashMap<String, LegacyItemDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyItemDoc {
    #[serde(default)]
    item_name: String,
    #[serde(default)]
    drop_count: u64,
    #[serde(default)]
    expected_drop_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRankDoc {
    #[serde(default)]
    total_booty: u64,
    current_rank: String,
}

// ============================================================================
// Store
// ============================================================================

/// Persistence gateway rooted at one data directory.
#[derive(Debug, Clone)]
pub struct SalvageStore {
    data_dir: PathBuf,
}

impl SalvageStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the stats ledger, migrating a legacy store if one is found
    /// and no current-format document exists yet.
    pub fn load_ledger(&self) -> SalvageLedger {
        let path = self.data_dir.join(STATS_FILE);
        if !path.exists() {
            if let Some(ledger) = self.migrate_legacy_stats() {
                return ledger;
            }
            debug!("No stats at {}, starting empty", path.display());
            return SalvageLedger::new();
        }

        match read_json::<HashMap<String, KindStatsDoc>>(&path) {
            Ok(doc) => ledger_from_doc(doc),
            Err(e) => {
                warn!("Stats at {} unreadable: {}", path.display(), e);
                sideline_corrupt(&path);
                SalvageLedger::new()
            }
        }
    }

    /// Load rank progression, migrating a legacy store if one is found
    /// and no current-format document exists yet.
    pub fn load_progress(&self) -> RankProgress {
        let path = self.data_dir.join(RANK_FILE);
        if !path.exists() {
            if let Some(progress) = self.migrate_legacy_progress() {
                return progress;
            }
            debug!("No rank data at {}, starting fresh", path.display());
            return RankProgress::new();
        }

        match read_json::<RankDoc>(&path) {
            Ok(doc) => match RankProgress::from_saved(doc.total_value, doc.rank) {
                Some(progress) => progress,
                None => {
                    warn!(
                        "Rank {} in {} does not exist on the ladder",
                        doc.rank,
                        path.display()
                    );
                    sideline_corrupt(&path);
                    RankProgress::new()
                }
            },
            Err(e) => {
                warn!("Rank data at {} unreadable: {}", path.display(), e);
                sideline_corrupt(&path);
                RankProgress::new()
            }
        }
    }

    pub fn save_ledger(&self, ledger: &SalvageLedger) -> Result<(), StoreError> {
        let mut doc: HashMap<String, KindStatsDoc> = HashMap::new();
        for (kind, stats) in ledger.iter() {
            let items = stats
                .items
                .iter()
                .map(|(id, item)| {
                    (
                        id.to_string(),
                        ItemStatDoc {
                            name: item.name.clone(),
                            drops: item.drops,
                            quantity: item.quantity,
                            expected_rate: item.expected_rate,
                        },
                    )
                })
                .collect();
            doc.insert(
                kind.token().to_string(),
                KindStatsDoc {
                    total_events: stats.total_events,
                    last_updated: stats.last_updated,
                    items,
                },
            );
        }
        self.write_json(&self.data_dir.join(STATS_FILE), &doc)
    }

    pub fn save_progress(&self, progress: &RankProgress) -> Result<(), StoreError> {
        let doc = RankDoc {
            total_value: progress.total_value(),
            rank: progress.current().rank,
        };
        self.write_json(&self.data_dir.join(RANK_FILE), &doc)
    }

    // ------------------------------------------------------------------
    // Legacy migration
    // ------------------------------------------------------------------

    fn migrate_legacy_stats(&self) -> Option<SalvageLedger> {
        let legacy_path = self.data_dir.join(LEGACY_STATS_FILE);
        if !legacy_path.exists() {
            return None;
        }

        info!("Migrating legacy stats from {}", legacy_path.display());
        let doc: HashMap<String, LegacyKindDoc> = match read_json(&legacy_path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Legacy stats unreadable: {}", e);
                sideline_corrupt(&legacy_path);
                return None;
            }
        };

        let migrated_at = Utc::now();
        let mut kinds = HashMap::new();
        for (token, legacy) in doc {
            let Some(kind) = kind_by_token(&token) else {
                warn!("Skipping legacy stats for unrecognized salvage kind '{}'", token);
                continue;
            };
            let mut items = HashMap::new();
            for (id_text, item) in legacy.items {
                let Ok(item_id) = id_text.parse::<u32>() else {
                    warn!("Skipping legacy item with unusable id '{}'", id_text);
                    continue;
                };
                items.insert(
                    item_id,
                    ItemStat {
                        item_id,
                        name: item.item_name,
                        drops: item.drop_count,
                        // Legacy files never tracked units. Assume one per event.
                        quantity: item.drop_count,
                        expected_rate: item.expected_drop_rate,
                    },
                );
            }
            kinds.insert(
                kind,
                KindStats {
                    total_events: legacy.total_loots,
                    last_updated: migrated_at,
                    items,
                },
            );
        }

        let ledger = SalvageLedger::from_kinds(kinds);
        if let Err(e) = self.save_ledger(&ledger) {
            // Leave the legacy file alone so the next start can retry.
            warn!("Failed to write migrated stats: {}", e);
            return Some(ledger);
        }
        mark_migrated(&legacy_path);
        Some(ledger)
    }

    fn migrate_legacy_progress(&self) -> Option<RankProgress> {
        let legacy_path = self.data_dir.join(LEGACY_RANK_FILE);
        if !legacy_path.exists() {
            return None;
        }

        info!("Migrating legacy rank data from {}", legacy_path.display());
        let doc: LegacyRankDoc = match read_json(&legacy_path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Legacy rank data unreadable: {}", e);
                sideline_corrupt(&legacy_path);
                return None;
            }
        };

        let progress = parse_legacy_rank(&doc.current_rank)
            .and_then(|rank| RankProgress::from_saved(doc.total_booty, rank));
        let Some(progress) = progress else {
            warn!(
                "Legacy rank token '{}' does not map to the ladder",
                doc.current_rank
            );
            sideline_corrupt(&legacy_path);
            return None;
        };

        if let Err(e) = self.save_progress(&progress) {
            warn!("Failed to write migrated rank data: {}", e);
            return Some(progress);
        }
        mark_migrated(&legacy_path);
        Some(progress)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let contents = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn ledger_from_doc(doc: HashMap<String, KindStatsDoc>) -> SalvageLedger {
    let mut kinds: HashMap<SalvageKind, KindStats> = HashMap::new();
    for (token, kind_doc) in doc {
        let Some(kind) = kind_by_token(&token) else {
            warn!("Skipping stats for unrecognized salvage kind '{}'", token);
            continue;
        };
        let mut items = HashMap::new();
        for (id_text, item_doc) in kind_doc.items {
            let Ok(item_id) = id_text.parse::<u32>() else {
                warn!("Skipping item with unusable id '{}'", id_text);
                continue;
            };
            items.insert(
                item_id,
                ItemStat {
                    item_id,
                    name: item_doc.name,
                    drops: item_doc.drops,
                    quantity: item_doc.quantity,
                    expected_rate: item_doc.expected_rate,
                },
            );
        }
        kinds.insert(
            kind,
            KindStats {
                total_events: kind_doc.total_events,
                last_updated: kind_doc.last_updated,
                items,
            },
        );
    }
    SalvageLedger::from_kinds(kinds)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Rename an unreadable document out of the way instead of deleting it.
fn sideline_corrupt(path: &Path) {
    let target = path.with_extension("json.corrupt");
    match fs::rename(path, &target) {
        Ok(()) => warn!("Set aside unreadable file as {}", target.display()),
        Err(e) => warn!("Failed to set aside {}: {}", path.display(), e),
    }
}

fn mark_migrated(path: &Path) {
    let target = path.with_extension("json.migrated");
    match fs::rename(path, &target) {
        Ok(()) => info!("Retired legacy file as {}", target.display()),
        Err(e) => warn!("Failed to retire legacy file {}: {}", path.display(), e),
    }
}

fn parse_legacy_rank(token: &str) -> Option<u16> {
    token.trim().strip_prefix("RANK_")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SalvageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SalvageStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_fresh_directory_loads_empty_state() {
        let (_dir, store) = store();
        assert!(store.load_ledger().is_empty());
        let progress = store.load_progress();
        assert_eq!(progress.current().rank, 1);
        assert_eq!(progress.total_value(), 0);
    }

    #[test]
    fn test_ledger_round_trip() {
        let (dir, store) = store();
        let mut ledger = SalvageLedger::new();
        ledger.record(SalvageKind::Small, 954, "Rope", 0.14, 1);
        ledger.record(SalvageKind::Small, 954, "Rope", 0.14, 3);
        ledger.record(SalvageKind::Mercenary, 1317, "Adamant 2h sword", 0.12, 1);

        store.save_ledger(&ledger).unwrap();
        assert!(dir.path().join(STATS_FILE).exists());
        assert!(!dir.path().join("stats.json.tmp").exists());

        let loaded = store.load_ledger();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_progress_round_trip_clears_transients() {
        let (_dir, store) = store();
        let mut progress = RankProgress::new();
        progress.add_value(25_000);
        assert!(progress.rank_up_pending());

        store.save_progress(&progress).unwrap();
        let loaded = store.load_progress();
        assert_eq!(loaded.total_value(), 25_000);
        assert_eq!(loaded.current().rank, 2);
        assert!(!loaded.rank_up_pending());
        assert_eq!(loaded.previous(), None);
    }

    #[test]
    fn test_corrupt_stats_set_aside() {
        let (dir, store) = store();
        fs::write(dir.path().join(STATS_FILE), "{ definitely not json").unwrap();

        assert!(store.load_ledger().is_empty());
        assert!(!dir.path().join(STATS_FILE).exists());
        let kept = fs::read_to_string(dir.path().join("stats.json.corrupt")).unwrap();
        assert_eq!(kept, "{ definitely not json");
    }

    #[test]
    fn test_corrupt_rank_set_aside() {
        let (dir, store) = store();
        fs::write(dir.path().join(RANK_FILE), "[]").unwrap();

        assert_eq!(store.load_progress().current().rank, 1);
        assert!(!dir.path().join(RANK_FILE).exists());
        assert!(dir.path().join("rank.json.corrupt").exists());
    }

    #[test]
    fn test_rank_outside_ladder_set_aside() {
        let (dir, store) = store();
        fs::write(
            dir.path().join(RANK_FILE),
            r#"{"total_value": 5, "rank": 200}"#,
        )
        .unwrap();

        let progress = store.load_progress();
        assert_eq!(progress.current().rank, 1);
        assert_eq!(progress.total_value(), 0);
        assert!(dir.path().join("rank.json.corrupt").exists());
    }

    #[test]
    fn test_unknown_kind_token_skipped_on_load() {
        let (dir, store) = store();
        fs::write(
            dir.path().join(STATS_FILE),
            r#"{
                "SMALL": {"total_events": 2, "items": {"954": {"name": "Rope", "drops": 2, "quantity": 2}}},
                "MEDIUM": {"total_events": 9, "items": {}}
            }"#,
        )
        .unwrap();

        let ledger = store.load_ledger();
        assert_eq!(ledger.kind(SalvageKind::Small).unwrap().total_events, 2);
        assert_eq!(ledger.iter().count(), 1);
    }

    #[test]
    fn test_unusable_item_id_skipped_on_load() {
        let (dir, store) = store();
        fs::write(
            dir.path().join(STATS_FILE),
            r#"{"SMALL": {"total_events": 2, "items": {
                "954": {"name": "Rope", "drops": 1, "quantity": 1},
                "not-an-id": {"name": "Mystery", "drops": 1, "quantity": 1}
            }}}"#,
        )
        .unwrap();

        let ledger = store.load_ledger();
        let stats = ledger.kind(SalvageKind::Small).unwrap();
        assert_eq!(stats.items.len(), 1);
        assert!(stats.items.contains_key(&954));
    }

    #[test]
    fn test_legacy_stats_migrate_once() {
        let (dir, store) = store();
        fs::write(
            dir.path().join("salvage-data.json"),
            r#"{
                "SMALL": {
                    "totalLoots": 3,
                    "items": {
                        "954": {"itemName": "Rope", "dropCount": 3, "expectedDropRate": 0.14},
                        "oops": {"itemName": "Mystery", "dropCount": 1, "expectedDropRate": 0.0}
                    }
                },
                "MEDIUM": {"totalLoots": 5, "items": {}}
            }"#,
        )
        .unwrap();

        let ledger = store.load_ledger();
        let stats = ledger.kind(SalvageKind::Small).unwrap();
        assert_eq!(stats.total_events, 3);
        let rope = &stats.items[&954];
        assert_eq!(rope.name, "Rope");
        assert_eq!(rope.drops, 3);
        assert_eq!(rope.quantity, 3);
        assert_eq!(rope.expected_rate, 0.14);
        // The unknown kind and the unusable item id are dropped.
        assert_eq!(ledger.iter().count(), 1);
        assert_eq!(stats.items.len(), 1);

        // Migration rewrote the store and retired the legacy file.
        assert!(dir.path().join(STATS_FILE).exists());
        assert!(!dir.path().join("salvage-data.json").exists());
        assert!(dir.path().join("salvage-data.json.migrated").exists());

        // A second load reads the migrated document, not the legacy one.
        let again = store.load_ledger();
        assert_eq!(again, ledger);
    }

    #[test]
    fn test_legacy_rank_migrates_once() {
        let (dir, store) = store();
        fs::write(
            dir.path().join("pirate_rank.json"),
            r#"{"totalBooty": 22021, "currentRank": "RANK_2", "justRankedUp": true}"#,
        )
        .unwrap();

        let progress = store.load_progress();
        assert_eq!(progress.total_value(), 22_021);
        assert_eq!(progress.current().rank, 2);
        assert!(!progress.rank_up_pending());

        assert!(dir.path().join(RANK_FILE).exists());
        assert!(!dir.path().join("pirate_rank.json").exists());
        assert!(dir.path().join("pirate_rank.json.migrated").exists());

        let again = store.load_progress();
        assert_eq!(again.total_value(), 22_021);
        assert_eq!(again.current().rank, 2);
    }

    #[test]
    fn test_legacy_rank_with_unusable_token_set_aside() {
        let (dir, store) = store();
        fs::write(
            dir.path().join("pirate_rank.json"),
            r#"{"totalBooty": 5, "currentRank": "CASTAWAY"}"#,
        )
        .unwrap();

        let progress = store.load_progress();
        assert_eq!(progress.current().rank, 1);
        assert_eq!(progress.total_value(), 0);
        assert!(dir.path().join("pirate_rank.json.corrupt").exists());
    }

    #[test]
    fn test_legacy_ignored_when_current_store_exists() {
        let (dir, store) = store();
        let mut ledger = SalvageLedger::new();
        ledger.record(SalvageKind::Pirate, 995, "Coins", 0.3, 100);
        store.save_ledger(&ledger).unwrap();

        fs::write(
            dir.path().join("salvage-data.json"),
            r#"{"SMALL": {"totalLoots": 9, "items": {}}}"#,
        )
        .unwrap();

        let loaded = store.load_ledger();
        assert!(loaded.kind(SalvageKind::Small).is_none());
        assert!(loaded.kind(SalvageKind::Pirate).is_some());
        // The legacy file is left untouched.
        assert!(dir.path().join("salvage-data.json").exists());
    }

    #[test]
    fn test_parse_legacy_rank_tokens() {
        assert_eq!(parse_legacy_rank("RANK_1"), Some(1));
        assert_eq!(parse_legacy_rank(" RANK_100 "), Some(100));
        assert_eq!(parse_legacy_rank("RANK_"), None);
        assert_eq!(parse_legacy_rank("CASTAWAY"), None);
        assert_eq!(parse_legacy_rank("rank_3"), None);
    }
}
