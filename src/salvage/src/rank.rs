//! Pirate rank ladder reference data
//!
//! One hundred ranks driven by total looted value. Thresholds grow roughly
//! exponentially from zero to the 2,147,483,647 gp cap, so early ranks come
//! quickly and the last few take a career.

/// One rung of the rank ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTier {
    /// 1-based position in the ladder. Persisted, so stable across builds.
    pub rank: u16,
    /// Total looted value required to hold this rank.
    pub threshold: u64,
    pub name: &'static str,
    pub description: &'static str,
}

const fn tier(rank: u16, threshold: u64, name: &'static str, description: &'static str) -> RankTier {
    RankTier {
        rank,
        threshold,
        name,
        description,
    }
}

/// All ranks in ascending order. Thresholds are strictly increasing.
pub const RANK_LADDER: &[RankTier] = &[
    tier(1, 0, "Castaway", "Washed up in Lumbridge"),
    tier(2, 22_021, "Beachcomber", "Collecting seashells"),
    tier(3, 124_570, "Deck Swabber", "Cleaning barnacles"),
    tier(4, 343_277, "Rope Hauler", "Learning the ropes"),
    tier(5, 704_679, "Cabin Boy", "Fetching grog"),
    tier(6, 1_231_025, "Bilge Rat", "Working the depths"),
    tier(7, 1_941_869, "Powder Monkey", "Handling cannons"),
    tier(8, 2_854_874, "Galley Hand", "Peeling potatoes"),
    tier(9, 3_986_271, "Ship's Cook", "Burnt fish specialist"),
    tier(10, 5_351_162, "Able Seaman", "Competent sailor"),
    tier(11, 6_963_729, "Deck Hand", "Trusted crewmate"),
    tier(12, 8_837_381, "Rigger", "Rope master"),
    tier(13, 10_984_871, "Topman", "Climbing high"),
    tier(14, 13_418_385, "Lookout", "Eagle eyes"),
    tier(15, 16_149_607, "Navigator", "Chart reader"),
    tier(16, 19_189_781, "Gunner", "Cannon operator"),
    tier(17, 22_549_755, "Bosun", "Crew supervisor"),
    tier(18, 26_240_021, "Master Gunner", "Artillery expert"),
    tier(19, 30_270_747, "Sailing Master", "Wind whisperer"),
    tier(20, 34_651_806, "Quartermaster", "Supply manager"),
    tier(21, 39_392_801, "Carpenter", "Ship builder"),
    tier(22, 44_503_084, "Surgeon", "Sawbones"),
    tier(23, 49_991_777, "First Mate", "Right hand"),
    tier(24, 55_867_787, "Helmsman", "Wheel master"),
    tier(25, 62_139_818, "Privateer", "Licensed raider"),
    tier(26, 68_816_392, "Buccaneer", "Caribbean terror"),
    tier(27, 75_905_850, "Corsair", "Coastal menace"),
    tier(28, 83_416_370, "Sea Wolf", "Ocean predator"),
    tier(29, 91_355_975, "Marauder", "Island raider"),
    tier(30, 99_732_538, "Raider Captain", "Leading raids"),
    tier(31, 108_553_796, "Plunderer", "Treasure hunter"),
    tier(32, 117_827_350, "Freebooter", "Independent spirit"),
    tier(33, 127_560_679, "Brigand", "Lawless bandit"),
    tier(34, 137_761_140, "Sea Reaver", "Ocean pillager"),
    tier(35, 148_435_975, "Pirate Captain", "Ship commander"),
    tier(36, 159_592_320, "Pirate Lord", "Fleet owner"),
    tier(37, 171_237_205, "Dread Pirate", "Fear incarnate"),
    tier(38, 183_377_559, "Scourge", "Naval nightmare"),
    tier(39, 196_020_219, "Terror", "Coastal doom"),
    tier(40, 209_171_926, "Pirate King", "Regional ruler"),
    tier(41, 222_839_336, "Skeletal Captain", "Undead commander"),
    tier(42, 237_029_019, "Ghost Admiral", "Phantom fleet"),
    tier(43, 251_747_464, "Treasure Baron", "Wealth hoarder"),
    tier(44, 267_001_079, "Fleet Admiral", "Armada leader"),
    tier(45, 282_796_200, "Sea Tyrant", "Ocean dictator"),
    tier(46, 299_139_086, "Pirate Emperor", "Maritime crown"),
    tier(47, 316_035_928, "Kraken Slayer", "Deep hunter"),
    tier(48, 333_492_847, "Leviathan Tamer", "Beast master"),
    tier(49, 351_515_898, "Storm Caller", "Weather bender"),
    tier(50, 370_111_073, "Ocean Sovereign", "Sea lord"),
    tier(51, 389_284_300, "Poseidon's Rival", "God challenger"),
    tier(52, 409_041_449, "Davy Jones", "Locker keeper"),
    tier(53, 429_388_331, "Ancient Mariner", "Timeless sailor"),
    tier(54, 450_330_698, "Immortal Captain", "Deathless legend"),
    tier(55, 471_874_249, "Phantom King", "Spectral ruler"),
    tier(56, 494_024_631, "Cursed One", "Eternal wanderer"),
    tier(57, 516_787_435, "Nightmare", "Dream invader"),
    tier(58, 540_168_205, "Abyssal Lord", "Deep dweller"),
    tier(59, 564_172_434, "Void Pirate", "Darkness master"),
    tier(60, 588_805_567, "Cosmic Corsair", "Star sailor"),
    tier(61, 614_073_003, "Dragon Slayer", "Wyrm bane"),
    tier(62, 639_980_094, "Giant Killer", "Titan feller"),
    tier(63, 666_532_150, "Demon Hunter", "Hell raider"),
    tier(64, 693_734_435, "God Slayer", "Divine bane"),
    tier(65, 721_592_173, "Chaos Bringer", "Order breaker"),
    tier(66, 750_110_544, "Void Walker", "Reality bender"),
    tier(67, 779_294_691, "Time Pirate", "Temporal raider"),
    tier(68, 809_149_715, "Dimension Lord", "Plane hopper"),
    tier(69, 839_680_679, "Reality Breaker", "Laws defier"),
    tier(70, 870_892_610, "Infinity Captain", "Endless voyager"),
    tier(71, 902_790_496, "Cosmic Emperor", "Universe ruler"),
    tier(72, 935_379_291, "Eternal King", "Timeless sovereign"),
    tier(73, 968_663_911, "Omnipotent", "All-powerful"),
    tier(74, 1_002_649_240, "Transcendent", "Beyond mortal"),
    tier(75, 1_037_340_127, "Ascended One", "Higher plane"),
    tier(76, 1_072_741_389, "Divine Pirate", "Godhood achieved"),
    tier(77, 1_108_857_809, "Supreme Being", "Ultimate power"),
    tier(78, 1_145_694_140, "Celestial Lord", "Heavenly ruler"),
    tier(79, 1_183_255_101, "Astral King", "Cosmic sovereign"),
    tier(80, 1_221_545_384, "Multiverse Pirate", "Reality hopper"),
    tier(81, 1_260_569_649, "Existence Shaper", "Reality sculptor"),
    tier(82, 1_300_332_526, "Paradox Master", "Logic breaker"),
    tier(83, 1_340_838_618, "Entropy Lord", "Chaos embodied"),
    tier(84, 1_382_092_498, "Singularity", "Unified force"),
    tier(85, 1_424_098_713, "Origin Pirate", "First raider"),
    tier(86, 1_466_861_780, "Primordial", "Ancient power"),
    tier(87, 1_510_386_193, "Harbinger", "End bringer"),
    tier(88, 1_554_676_415, "Apocalypse", "World ender"),
    tier(89, 1_599_736_888, "Omega", "Final captain"),
    tier(90, 1_645_572_024, "Beyond", "Past limits"),
    tier(91, 1_692_186_213, "Unfathomable", "Past comprehension"),
    tier(92, 1_739_583_820, "Incomprehensible", "Mind breaking"),
    tier(93, 1_787_769_184, "Ineffable", "Beyond words"),
    tier(94, 1_836_746_624, "Absolute", "Total power"),
    tier(95, 1_886_520_430, "Perfect", "Flawless mastery"),
    tier(96, 1_937_094_875, "Ultimate", "Final form"),
    tier(97, 1_988_474_204, "Supreme", "Highest peak"),
    tier(98, 2_040_662_644, "Pinnacle", "Apex achieved"),
    tier(99, 2_093_664_398, "Zenith", "Maximum height"),
    tier(100, 2_147_483_647, "King of the Pirates", "2,147,483,647 GP"),
];

// ============================================================================
// Lookup functions
// ============================================================================

/// Get the rank held at a given total looted value.
///
/// Returns the highest tier whose threshold is at or below `value`. Values
/// past the final threshold stay at the final rank.
pub fn tier_for_value(value: u64) -> &'static RankTier {
    let mut current = &RANK_LADDER[0];
    for candidate in RANK_LADDER {
        if value >= candidate.threshold {
            current = candidate;
        } else {
            break;
        }
    }
    current
}

/// Get a tier by its 1-based rank number.
pub fn tier_by_rank(rank: u16) -> Option<&'static RankTier> {
    let index = rank.checked_sub(1)? as usize;
    RANK_LADDER.get(index)
}

/// Get the tier above `tier`, or `None` at the top of the ladder.
pub fn next_tier(tier: &RankTier) -> Option<&'static RankTier> {
    RANK_LADDER.get(tier.rank as usize)
}

/// Fraction of the way from `tier`'s threshold to the next one, in [0, 1].
///
/// The final rank always reports 1.0.
pub fn progress_fraction(tier: &RankTier, value: u64) -> f64 {
    match next_tier(tier) {
        Some(next) => fraction_between(tier.threshold, next.threshold, value),
        None => 1.0,
    }
}

/// Value still needed to reach the rank above `tier`, zero at the top.
pub fn value_to_next(tier: &RankTier, value: u64) -> u64 {
    match next_tier(tier) {
        Some(next) => next.threshold.saturating_sub(value),
        None => 0,
    }
}

/// Position of `value` between two thresholds, clamped to [0, 1].
///
/// A span that is not strictly increasing reports 1.0 rather than
/// dividing by zero.
fn fraction_between(lower: u64, upper: u64, value: u64) -> f64 {
    if upper <= lower {
        return 1.0;
    }
    let gained = value.saturating_sub(lower) as f64;
    let span = (upper - lower) as f64;
    (gained / span).clamp(0.0, 1.0)
}
