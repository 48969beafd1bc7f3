//! Salvage kind reference data
//!
//! The salvage sources the Sailing skill reports in chat, with display
//! labels and the raw chat tokens used to recognize them. Lines that name
//! a source we do not recognize still get tracked under [`SalvageKind::Unknown`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Salvage kinds
// ============================================================================

/// A source of salvage loot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalvageKind {
    Small,
    Fishy,
    Barracuda,
    Large,
    Pirate,
    Mercenary,
    Fremennik,
    Opulent,
    Unknown,
}

/// Display label and chat aliases for one salvage kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindInfo {
    pub kind: SalvageKind,
    /// Stable token used as a key in persisted documents.
    pub token: &'static str,
    pub label: &'static str,
    /// Lowercase tokens the game uses for this kind in chat.
    pub aliases: &'static [&'static str],
}

/// All salvage kinds in display order, `Unknown` last.
pub const SALVAGE_KINDS: &[KindInfo] = &[
    KindInfo {
        kind: SalvageKind::Small,
        token: "SMALL",
        label: "Small",
        aliases: &["small"],
    },
    KindInfo {
        kind: SalvageKind::Fishy,
        token: "FISHY",
        label: "Fishy",
        aliases: &["fishy"],
    },
    KindInfo {
        kind: SalvageKind::Barracuda,
        token: "BARRACUDA",
        label: "Barracuda",
        aliases: &["barracuda"],
    },
    KindInfo {
        kind: SalvageKind::Large,
        token: "LARGE",
        label: "Large",
        aliases: &["large"],
    },
    KindInfo {
        kind: SalvageKind::Pirate,
        token: "PIRATE",
        label: "Pirate",
        aliases: &["pirate"],
    },
    KindInfo {
        kind: SalvageKind::Mercenary,
        token: "MERCENARY",
        label: "Mercenary",
        aliases: &["martial"],
    },
    KindInfo {
        kind: SalvageKind::Fremennik,
        token: "FREMENNIK",
        label: "Fremennik",
        aliases: &["fremennik"],
    },
    KindInfo {
        kind: SalvageKind::Opulent,
        token: "OPULENT",
        label: "Opulent",
        aliases: &["opulent", "gilded"],
    },
    KindInfo {
        kind: SalvageKind::Unknown,
        token: "UNKNOWN",
        label: "Unknown",
        aliases: &[],
    },
];

// ============================================================================
// Lookup functions
// ============================================================================

/// Get the reference entry for a kind.
pub fn kind_info(kind: SalvageKind) -> &'static KindInfo {
    // SALVAGE_KINDS covers every variant, checked by test below.
    SALVAGE_KINDS
        .iter()
        .find(|info| info.kind == kind)
        .unwrap_or(&SALVAGE_KINDS[SALVAGE_KINDS.len() - 1])
}

/// Get a kind by its persisted token (case-insensitive).
pub fn kind_by_token(token: &str) -> Option<SalvageKind> {
    SALVAGE_KINDS
        .iter()
        .find(|info| info.token.eq_ignore_ascii_case(token))
        .map(|info| info.kind)
}

/// Resolve a raw chat token to a salvage kind.
///
/// Tries, in order: exact alias match, exact label match, then alias
/// containment anywhere in the token. All comparisons are case-insensitive.
/// Tokens that match nothing resolve to [`SalvageKind::Unknown`].
pub fn kind_from_chat(token: &str) -> SalvageKind {
    let folded = token.trim().to_lowercase();
    if folded.is_empty() {
        return SalvageKind::Unknown;
    }

    for info in SALVAGE_KINDS {
        if info.aliases.iter().any(|alias| *alias == folded) {
            return info.kind;
        }
    }

    for info in SALVAGE_KINDS {
        if info.label.eq_ignore_ascii_case(&folded) {
            return info.kind;
        }
    }

    for info in SALVAGE_KINDS {
        if info.aliases.iter().any(|alias| folded.contains(alias)) {
            return info.kind;
        }
    }

    SalvageKind::Unknown
}

impl SalvageKind {
    /// All kinds in display order, `Unknown` last.
    pub fn all() -> impl Iterator<Item = SalvageKind> {
        SALVAGE_KINDS.iter().map(|info| info.kind)
    }

    /// Kinds that correspond to a real salvage source.
    pub fn known() -> impl Iterator<Item = SalvageKind> {
        Self::all().filter(|kind| *kind != SalvageKind::Unknown)
    }

    pub fn label(self) -> &'static str {
        kind_info(self).label
    }

    pub fn token(self) -> &'static str {
        kind_info(self).token
    }
}

impl fmt::Display for SalvageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SalvageKind {
    type Err = String;

    /// Parse user input. Accepts tokens, labels, and chat aliases, but
    /// only maps to `Unknown` when asked for it by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = kind_by_token(s.trim()) {
            return Ok(kind);
        }
        match kind_from_chat(s) {
            SalvageKind::Unknown => Err(format!(
                "unknown salvage kind '{}' (expected one of: {})",
                s,
                SALVAGE_KINDS
                    .iter()
                    .map(|info| info.label.to_lowercase())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            kind => Ok(kind),
        }
    }
}
