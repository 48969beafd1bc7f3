//! Expected drop rates
//!
//! Reference probabilities for salvage items, keyed by kind and case-folded
//! item name. A bundled table ships inside the binary; a user-editable copy
//! in the data directory overrides it entry by entry. Missing or unreadable
//! tables degrade to "no rate known" rather than failing the caller.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::category::{kind_by_token, SalvageKind};

/// Bundled defaults compiled into the binary.
const BUNDLED_RATES: &str = include_str!("../../../share/drop_rates.json");

/// File name of the user-editable copy inside the data directory.
pub const RATES_FILE: &str = "drop_rates.json";

#[derive(Debug, Deserialize)]
struct RatesDoc {
    #[serde(default)]
    salvage: HashMap<String, KindRatesDoc>,
}

#[derive(Debug, Deserialize)]
struct KindRatesDoc {
    #[serde(default)]
    items: HashMap<String, f64>,
}

/// Expected per-event drop rates for salvage items.
#[derive(Debug, Clone, Default)]
pub struct DropRateTable {
    rates: HashMap<SalvageKind, HashMap<String, f64>>,
}

impl DropRateTable {
    /// Bundled defaults only, without consulting the data directory.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_RATES)
    }

    /// Parse a rate document, skipping entries that cannot be used.
    ///
    /// An unparseable document yields an empty table.
    pub fn from_json(text: &str) -> Self {
        let mut table = Self::default();
        match serde_json::from_str::<RatesDoc>(text) {
            Ok(doc) => table.apply(doc),
            Err(e) => warn!("Failed to parse drop rate table: {}", e),
        }
        table
    }

    /// Load bundled defaults, then apply overrides from `data_dir`.
    ///
    /// When no override file exists yet, the bundled table is copied out so
    /// the user has an editable starting point.
    pub fn load(data_dir: &Path) -> Self {
        let mut table = Self::bundled();

        let user_path = data_dir.join(RATES_FILE);
        if user_path.exists() {
            match fs::read_to_string(&user_path) {
                Ok(text) => match serde_json::from_str::<RatesDoc>(&text) {
                    Ok(doc) => {
                        table.apply(doc);
                        debug!("Applied drop rate overrides from {}", user_path.display());
                    }
                    Err(e) => warn!(
                        "Ignoring unparseable drop rate overrides at {}: {}",
                        user_path.display(),
                        e
                    ),
                },
                Err(e) => warn!(
                    "Failed to read drop rate overrides at {}: {}",
                    user_path.display(),
                    e
                ),
            }
        } else if let Err(e) = copy_bundled_to(&user_path) {
            warn!(
                "Failed to write default drop rates to {}: {}",
                user_path.display(),
                e
            );
        }

        table
    }

    /// Expected per-event rate for an item, 0.0 when none is known.
    pub fn expected_rate(&self, kind: SalvageKind, item_name: &str) -> f64 {
        self.rates
            .get(&kind)
            .and_then(|items| items.get(&item_name.to_lowercase()))
            .copied()
            .unwrap_or(0.0)
    }

    /// All known rates for one kind, keyed by case-folded item name.
    pub fn kind_items(&self, kind: SalvageKind) -> Option<&HashMap<String, f64>> {
        self.rates.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.values().all(|items| items.is_empty())
    }

    /// Merge a parsed document in, replacing existing entries key by key.
    fn apply(&mut self, doc: RatesDoc) {
        for (token, kind_doc) in doc.salvage {
            let Some(kind) = kind_by_token(&token) else {
                warn!("Skipping drop rates for unrecognized salvage kind '{}'", token);
                continue;
            };
            let items = self.rates.entry(kind).or_default();
            for (name, rate) in kind_doc.items {
                if !rate.is_finite() {
                    warn!("Skipping non-finite drop rate for '{}'", name);
                    continue;
                }
                let clamped = rate.clamp(0.0, 1.0);
                if clamped != rate {
                    warn!("Clamping out-of-range drop rate {} for '{}'", rate, name);
                }
                items.insert(name.to_lowercase(), clamped);
            }
        }
    }
}

fn copy_bundled_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, BUNDLED_RATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table_parses() {
        let table = DropRateTable::bundled();
        assert!(!table.is_empty());
        assert!(table.expected_rate(SalvageKind::Mercenary, "Adamant 2h sword") > 0.0);
    }

    #[test]
    fn test_lookup_folds_case() {
        let table = DropRateTable::from_json(
            r#"{"salvage": {"SMALL": {"items": {"Iron Nails": 0.25}}}}"#,
        );
        assert_eq!(table.expected_rate(SalvageKind::Small, "iron nails"), 0.25);
        assert_eq!(table.expected_rate(SalvageKind::Small, "IRON NAILS"), 0.25);
    }

    #[test]
    fn test_missing_entries_report_zero() {
        let table = DropRateTable::bundled();
        assert_eq!(table.expected_rate(SalvageKind::Small, "no such item"), 0.0);
        assert_eq!(table.expected_rate(SalvageKind::Unknown, "rope"), 0.0);
    }

    #[test]
    fn test_garbage_document_degrades_to_empty() {
        let table = DropRateTable::from_json("{ not json");
        assert!(table.is_empty());
        assert_eq!(table.expected_rate(SalvageKind::Small, "rope"), 0.0);
    }

    #[test]
    fn test_unknown_kind_token_skipped() {
        let table = DropRateTable::from_json(
            r#"{"salvage": {"MEDIUM": {"items": {"Rope": 0.5}}, "SMALL": {"items": {"Rope": 0.25}}}}"#,
        );
        assert_eq!(table.expected_rate(SalvageKind::Small, "rope"), 0.25);
        assert_eq!(table.expected_rate(SalvageKind::Unknown, "rope"), 0.0);
    }

    #[test]
    fn test_rates_clamped_to_unit_interval() {
        let table = DropRateTable::from_json(
            r#"{"salvage": {"SMALL": {"items": {"Rope": 1.7, "Plank": -0.2}}}}"#,
        );
        assert_eq!(table.expected_rate(SalvageKind::Small, "rope"), 1.0);
        assert_eq!(table.expected_rate(SalvageKind::Small, "plank"), 0.0);
    }

    #[test]
    fn test_load_copies_bundled_defaults_out() {
        let dir = tempfile::tempdir().unwrap();
        let table = DropRateTable::load(dir.path());
        assert!(!table.is_empty());

        let copied = dir.path().join(RATES_FILE);
        assert!(copied.exists());
        let text = fs::read_to_string(copied).unwrap();
        assert_eq!(text, BUNDLED_RATES);
    }

    #[test]
    fn test_user_overrides_replace_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(RATES_FILE),
            r#"{"salvage": {"MERCENARY": {"items": {"Adamant 2h sword": 0.99}}}}"#,
        )
        .unwrap();

        let table = DropRateTable::load(dir.path());
        // Overridden entry replaced, untouched defaults still present.
        assert_eq!(
            table.expected_rate(SalvageKind::Mercenary, "adamant 2h sword"),
            0.99
        );
        assert!(table.expected_rate(SalvageKind::Mercenary, "rune dagger") > 0.0);
        assert!(table.expected_rate(SalvageKind::Small, "rope") > 0.0);
    }

    #[test]
    fn test_corrupt_user_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RATES_FILE), "{{{ nope").unwrap();

        let table = DropRateTable::load(dir.path());
        assert!(table.expected_rate(SalvageKind::Small, "rope") > 0.0);
    }
}
