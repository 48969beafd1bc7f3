//! Rank progression state
//!
//! Accumulates total looted value and tracks movement along the rank
//! ladder. Rank-ups latch a pending flag so a display layer can announce
//! them once and then acknowledge.

use crate::rank::{
    next_tier, progress_fraction, tier_by_rank, tier_for_value, value_to_next, RankTier,
    RANK_LADDER,
};

/// Mutable progression state driven by accumulated loot value.
#[derive(Debug, Clone)]
pub struct RankProgress {
    total_value: u64,
    current: &'static RankTier,
    previous: Option<&'static RankTier>,
    rank_up_pending: bool,
}

impl Default for RankProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl RankProgress {
    /// Fresh progression at the bottom of the ladder.
    pub fn new() -> Self {
        Self {
            total_value: 0,
            current: &RANK_LADDER[0],
            previous: None,
            rank_up_pending: false,
        }
    }

    /// Rebuild progression from persisted fields.
    ///
    /// The saved rank is trusted as-is so a rebalanced ladder never demotes
    /// anyone retroactively. Returns `None` when the rank number does not
    /// exist on the current ladder. Transient announcement state always
    /// starts cleared.
    pub fn from_saved(total_value: u64, rank: u16) -> Option<Self> {
        let current = tier_by_rank(rank)?;
        Some(Self {
            total_value,
            current,
            previous: None,
            rank_up_pending: false,
        })
    }

    /// Add looted value and recompute the held rank.
    ///
    /// Returns true when the rank changed. A single large haul can cross
    /// several thresholds at once; that still reports one rank-up, with
    /// `previous` naming the rank held before the haul.
    pub fn add_value(&mut self, value: u64) -> bool {
        self.total_value = self.total_value.saturating_add(value);
        let new_tier = tier_for_value(self.total_value);
        if new_tier.rank != self.current.rank {
            self.previous = Some(self.current);
            self.current = new_tier;
            self.rank_up_pending = true;
            return true;
        }
        false
    }

    /// Clear the pending rank-up announcement. Idempotent.
    pub fn acknowledge_rank_up(&mut self) {
        self.rank_up_pending = false;
    }

    pub fn total_value(&self) -> u64 {
        self.total_value
    }

    pub fn current(&self) -> &'static RankTier {
        self.current
    }

    /// Rank held before the most recent rank change, if any.
    pub fn previous(&self) -> Option<&'static RankTier> {
        self.previous
    }

    pub fn rank_up_pending(&self) -> bool {
        self.rank_up_pending
    }

    /// Fraction of the way to the next rank, 1.0 at the top.
    pub fn progress(&self) -> f64 {
        progress_fraction(self.current, self.total_value)
    }

    /// Value still needed for the next rank, zero at the top.
    pub fn value_to_next_rank(&self) -> u64 {
        value_to_next(self.current, self.total_value)
    }

    /// The rank above the current one, if any.
    pub fn next(&self) -> Option<&'static RankTier> {
        next_tier(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_bottom() {
        let progress = RankProgress::new();
        assert_eq!(progress.total_value(), 0);
        assert_eq!(progress.current().rank, 1);
        assert_eq!(progress.previous(), None);
        assert!(!progress.rank_up_pending());
        assert_eq!(progress.progress(), 0.0);
    }

    #[test]
    fn test_add_value_below_threshold_keeps_rank() {
        let mut progress = RankProgress::new();
        assert!(!progress.add_value(10_000));
        assert_eq!(progress.current().rank, 1);
        assert!(!progress.rank_up_pending());
        assert_eq!(progress.total_value(), 10_000);
    }

    #[test]
    fn test_rank_up_latches_pending_flag() {
        let mut progress = RankProgress::new();
        assert!(progress.add_value(22_021));
        assert_eq!(progress.current().rank, 2);
        assert_eq!(progress.previous().map(|t| t.rank), Some(1));
        assert!(progress.rank_up_pending());

        progress.acknowledge_rank_up();
        assert!(!progress.rank_up_pending());
        // Acknowledging twice is harmless.
        progress.acknowledge_rank_up();
        assert!(!progress.rank_up_pending());
        // The rank itself survives acknowledgement.
        assert_eq!(progress.current().rank, 2);
    }

    #[test]
    fn test_value_accumulates_across_hauls() {
        let mut progress = RankProgress::new();
        assert!(!progress.add_value(10_000));
        let expected = 10_000.0 / 22_021.0;
        assert!((progress.progress() - expected).abs() < 1e-9);

        // The second haul pushes the running total past the threshold.
        assert!(progress.add_value(15_000));
        assert_eq!(progress.total_value(), 25_000);
        assert_eq!(progress.current().rank, 2);
        let toward_third = (25_000.0 - 22_021.0) / (124_570.0 - 22_021.0);
        assert!((progress.progress() - toward_third).abs() < 1e-9);
    }

    #[test]
    fn test_one_haul_crossing_several_thresholds() {
        let mut progress = RankProgress::new();
        assert!(progress.add_value(400_000));
        assert_eq!(progress.current().rank, 4);
        assert_eq!(progress.previous().map(|t| t.rank), Some(1));
        assert!(progress.rank_up_pending());
    }

    #[test]
    fn test_progress_fraction_tracks_value() {
        let mut progress = RankProgress::new();
        progress.add_value(11_010);
        let expected = 11_010.0 / 22_021.0;
        assert!((progress.progress() - expected).abs() < 1e-9);
        assert_eq!(progress.value_to_next_rank(), 22_021 - 11_010);
    }

    #[test]
    fn test_at_top_rank_value_accumulates_quietly() {
        let mut progress = RankProgress::from_saved(2_147_483_647, 100).unwrap();
        assert!(!progress.add_value(50_000));
        assert_eq!(progress.current().rank, 100);
        assert!(!progress.rank_up_pending());
        assert_eq!(progress.total_value(), 2_147_483_647 + 50_000);
        assert_eq!(progress.progress(), 1.0);
        assert_eq!(progress.value_to_next_rank(), 0);
        assert!(progress.next().is_none());
    }

    #[test]
    fn test_total_value_saturates() {
        let mut progress = RankProgress::from_saved(u64::MAX - 10, 100).unwrap();
        progress.add_value(1_000);
        assert_eq!(progress.total_value(), u64::MAX);
    }

    #[test]
    fn test_from_saved_trusts_stored_rank() {
        let progress = RankProgress::from_saved(5_000, 17).unwrap();
        assert_eq!(progress.current().name, "Bosun");
        assert_eq!(progress.total_value(), 5_000);
        assert!(!progress.rank_up_pending());
        assert_eq!(progress.previous(), None);
    }

    #[test]
    fn test_from_saved_rejects_missing_rank() {
        assert!(RankProgress::from_saved(0, 0).is_none());
        assert!(RankProgress::from_saved(0, 101).is_none());
    }
}
