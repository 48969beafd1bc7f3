//! Chat line classification
//!
//! Turns raw game chat into structured loot events. The game reports salvage
//! hauls with a fixed sentence shape, so classification is template matching
//! rather than free-form parsing. Lines that do not fit a template, or that
//! fit one but carry an unusable quantity, are rejected outright.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::category::{kind_from_chat, SalvageKind};

/// One salvage haul parsed out of a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootEvent {
    pub kind: SalvageKind,
    pub item_name: String,
    pub quantity: u32,
}

impl LootEvent {
    /// Case-folded name used as a lookup key in rate tables.
    pub fn lookup_name(&self) -> String {
        self.item_name.to_lowercase()
    }
}

static QUANTIFIED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)You sort through the (.+?) salvage and find: (\d+) x (.+?)\.")
        .expect("Invalid quantified salvage pattern")
});

static SINGLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)You sort through the (.+?) salvage and find: (.+?)\.")
        .expect("Invalid single salvage pattern")
});

static LEADING_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\s*x\s").expect("Invalid leading count pattern")
});

/// Remove chat markup tags and unescape the entities the client emits.
pub fn strip_markup(raw: &str) -> String {
    static TAG: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag pattern"));
    TAG.replace_all(raw, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Classify one chat line (markup already stripped).
///
/// The quantified template (`find: N x Item.`) is tried first. If it
/// matches structurally but the quantity is zero or does not fit in a
/// `u32`, the whole line is rejected rather than reinterpreted. The
/// quantity-less template then covers single-item hauls (`find: Item.`)
/// with an implied quantity of one.
pub fn classify(line: &str) -> Option<LootEvent> {
    if let Some(caps) = QUANTIFIED.captures(line) {
        let quantity = caps[2].trim().parse::<u32>().ok().filter(|q| *q >= 1)?;
        let item_name = clean_item_name(&caps[3]);
        if item_name.is_empty() {
            return None;
        }
        return Some(LootEvent {
            kind: kind_from_chat(&caps[1]),
            item_name,
            quantity,
        });
    }

    if let Some(caps) = SINGLE.captures(line) {
        let item_name = clean_item_name(&caps[2]);
        // A leading "N x " here means the quantified template should have
        // handled the line and did not. Reject instead of guessing.
        if item_name.is_empty() || LEADING_COUNT.is_match(&item_name) {
            return None;
        }
        return Some(LootEvent {
            kind: kind_from_chat(&caps[1]),
            item_name,
            quantity: 1,
        });
    }

    None
}

fn clean_item_name(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(&[',', ';'][..])
        .trim_end()
        .to_string()
}
