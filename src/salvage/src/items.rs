//! Item identity and value resolution
//!
//! Salvage events arrive as bare item names. Stats are keyed by numeric id
//! and rank progression needs a gp value per item, so a resolver sits at
//! the boundary. Names the resolver cannot place still get a stable
//! synthetic id so their stats survive restarts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

/// Largest quantity a single event may contribute to looted value.
/// Anything above this is treated as a corrupted line and adds nothing.
pub const MAX_EVENT_QUANTITY: u32 = 1_000_000;

/// An item name resolved to its catalog identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedItem {
    pub id: u32,
    /// High alchemy value in gp. Zero means "no value known".
    pub high_alch: u32,
}

/// External lookup giving item names stable ids and reference values.
pub trait ItemResolver {
    fn resolve(&self, name: &str) -> Option<ResolvedItem>;
}

/// Stable synthetic id for names the resolver cannot place.
///
/// A 31-polynomial hash over the lowercase name, masked non-negative, so
/// the same unresolved item always lands in the same stats slot.
pub fn fallback_item_id(name: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in name.to_lowercase().chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as i32);
    }
    (hash & 0x7FFF_FFFF) as u32
}

// ============================================================================
// JSON catalog
// ============================================================================

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: u32,
    #[serde(default)]
    high_alch: u32,
}

/// File-backed resolver reading a name -> {id, high_alch} catalog from
/// the data directory. Missing or unreadable catalogs resolve nothing.
#[derive(Debug, Default)]
pub struct JsonItemCatalog {
    entries: HashMap<String, ResolvedItem>,
}

impl JsonItemCatalog {
    /// File name of the catalog inside the data directory.
    pub const FILE_NAME: &'static str = "item_values.json";

    /// Load the catalog from `data_dir`, degrading to empty on any failure.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(Self::FILE_NAME);
        if !path.exists() {
            debug!("No item catalog at {}", path.display());
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(text) => Self::from_json(&text),
            Err(e) => {
                warn!("Failed to read item catalog at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a catalog document. Unparseable documents yield an empty catalog.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<HashMap<String, CatalogEntry>>(text) {
            Ok(raw) => Self::from_entries(raw.into_iter().map(|(name, entry)| {
                (
                    name,
                    ResolvedItem {
                        id: entry.id,
                        high_alch: entry.high_alch,
                    },
                )
            })),
            Err(e) => {
                warn!("Failed to parse item catalog: {}", e);
                Self::default()
            }
        }
    }

    /// Build a catalog from name/item pairs. Names are case-folded.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, ResolvedItem)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, item)| (name.to_lowercase(), item))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ItemResolver for JsonItemCatalog {
    fn resolve(&self, name: &str) -> Option<ResolvedItem> {
        self.entries.get(&name.to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_id_is_stable_and_case_folded() {
        let a = fallback_item_id("Adamant 2h sword");
        let b = fallback_item_id("adamant 2H SWORD");
        assert_eq!(a, b);
        assert_ne!(a, fallback_item_id("Rune dagger"));
    }

    #[test]
    fn test_fallback_id_fits_mask() {
        for name in ["Rope", "Oyster pearls", "x", "", "Fremennik blade"] {
            assert!(fallback_item_id(name) <= 0x7FFF_FFFF);
        }
    }

    #[test]
    fn test_fallback_id_known_value() {
        // 31-polynomial over "ab": 'a' * 31 + 'b'.
        assert_eq!(fallback_item_id("ab"), 97 * 31 + 98);
        assert_eq!(fallback_item_id(""), 0);
    }

    #[test]
    fn test_catalog_resolves_case_insensitively() {
        let catalog = JsonItemCatalog::from_json(
            r#"{"Adamant 2h sword": {"id": 1317, "high_alch": 1920}}"#,
        );
        assert_eq!(catalog.len(), 1);
        let hit = catalog.resolve("ADAMANT 2H SWORD").unwrap();
        assert_eq!(hit.id, 1317);
        assert_eq!(hit.high_alch, 1920);
        assert!(catalog.resolve("Rope").is_none());
    }

    #[test]
    fn test_catalog_defaults_missing_value_to_zero() {
        let catalog = JsonItemCatalog::from_json(r#"{"Rope": {"id": 954}}"#);
        assert_eq!(catalog.resolve("rope").unwrap().high_alch, 0);
    }

    #[test]
    fn test_missing_catalog_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonItemCatalog::load(dir.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_corrupt_catalog_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(JsonItemCatalog::FILE_NAME), "[1, 2").unwrap();
        let catalog = JsonItemCatalog::load(dir.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(JsonItemCatalog::FILE_NAME),
            r#"{"Coins": {"id": 995, "high_alch": 1}}"#,
        )
        .unwrap();
        let catalog = JsonItemCatalog::load(dir.path());
        assert_eq!(catalog.resolve("coins").unwrap().id, 995);
    }
}
