//! Luck classification
//!
//! Compares an observed per-event drop rate against the expected rate and
//! buckets the ratio into a small set of bands, each with a display color.

const RGB_GOOD: [u8; 3] = [0, 200, 83];
const RGB_NEUTRAL: [u8; 3] = [255, 214, 0];
const RGB_BAD: [u8; 3] = [255, 68, 68];
const RGB_UNKNOWN: [u8; 3] = [192, 192, 192];

/// Ratio of observed to expected rate, or `None` when no expected rate
/// is known (missing or non-positive).
pub fn luck_ratio(observed: f64, expected: f64) -> Option<f64> {
    if expected > 0.0 {
        Some(observed / expected)
    } else {
        None
    }
}

/// How lucky an observed rate is relative to expectation.
///
/// `Lucky` and `Unlucky` carry a blend position in [0, 1] used to shade
/// their color toward the adjacent band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LuckBand {
    /// No expected rate to compare against. Distinct from `Neutral`.
    Unknown,
    VeryUnlucky,
    Unlucky(f64),
    Neutral,
    Lucky(f64),
    VeryLucky,
}

impl LuckBand {
    /// Bucket a luck ratio.
    ///
    /// Bands: >= 1.5 very lucky, >= 1.1 lucky, >= 0.9 neutral,
    /// >= 0.5 unlucky, below that very unlucky.
    pub fn from_ratio(ratio: Option<f64>) -> Self {
        match ratio {
            None => LuckBand::Unknown,
            Some(r) if r >= 1.5 => LuckBand::VeryLucky,
            Some(r) if r >= 1.1 => LuckBand::Lucky((r - 1.1) / 0.4),
            Some(r) if r >= 0.9 => LuckBand::Neutral,
            Some(r) if r >= 0.5 => LuckBand::Unlucky((r - 0.5) / 0.4),
            Some(_) => LuckBand::VeryUnlucky,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LuckBand::Unknown => "unknown",
            LuckBand::VeryUnlucky => "very unlucky",
            LuckBand::Unlucky(_) => "unlucky",
            LuckBand::Neutral => "neutral",
            LuckBand::Lucky(_) => "lucky",
            LuckBand::VeryLucky => "very lucky",
        }
    }

    /// Display color for this band.
    ///
    /// The blended bands interpolate linearly: `Unlucky` runs from the bad
    /// color at 0.0 to neutral at 1.0, `Lucky` from neutral to good.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            LuckBand::Unknown => RGB_UNKNOWN,
            LuckBand::VeryUnlucky => RGB_BAD,
            LuckBand::Unlucky(t) => lerp_rgb(RGB_BAD, RGB_NEUTRAL, *t),
            LuckBand::Neutral => RGB_NEUTRAL,
            LuckBand::Lucky(t) => lerp_rgb(RGB_NEUTRAL, RGB_GOOD, *t),
            LuckBand::VeryLucky => RGB_GOOD,
        }
    }
}

fn lerp_rgb(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let lo = from[i] as f64;
        let hi = to[i] as f64;
        *slot = (lo + t * (hi - lo)) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_expected_rate_is_unknown() {
        assert_eq!(luck_ratio(0.5, 0.0), None);
        assert_eq!(luck_ratio(0.5, -1.0), None);
        assert_eq!(LuckBand::from_ratio(None), LuckBand::Unknown);
        assert_ne!(LuckBand::from_ratio(None), LuckBand::Neutral);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(LuckBand::from_ratio(Some(1.5)), LuckBand::VeryLucky);
        assert_eq!(LuckBand::from_ratio(Some(2.3)), LuckBand::VeryLucky);
        assert!(matches!(LuckBand::from_ratio(Some(1.1)), LuckBand::Lucky(_)));
        assert!(matches!(LuckBand::from_ratio(Some(1.49)), LuckBand::Lucky(_)));
        assert_eq!(LuckBand::from_ratio(Some(0.9)), LuckBand::Neutral);
        assert_eq!(LuckBand::from_ratio(Some(1.0)), LuckBand::Neutral);
        assert!(matches!(LuckBand::from_ratio(Some(0.5)), LuckBand::Unlucky(_)));
        assert!(matches!(LuckBand::from_ratio(Some(0.89)), LuckBand::Unlucky(_)));
        assert_eq!(LuckBand::from_ratio(Some(0.49)), LuckBand::VeryUnlucky);
        assert_eq!(LuckBand::from_ratio(Some(0.0)), LuckBand::VeryUnlucky);
    }

    #[test]
    fn test_blend_positions() {
        if let LuckBand::Lucky(t) = LuckBand::from_ratio(Some(1.3)) {
            assert!((t - 0.5).abs() < 1e-9);
        } else {
            panic!("1.3 should be lucky");
        }
        if let LuckBand::Unlucky(t) = LuckBand::from_ratio(Some(0.7)) {
            assert!((t - 0.5).abs() < 1e-9);
        } else {
            panic!("0.7 should be unlucky");
        }
    }

    #[test]
    fn test_rgb_anchors() {
        assert_eq!(LuckBand::VeryLucky.rgb(), RGB_GOOD);
        assert_eq!(LuckBand::Neutral.rgb(), RGB_NEUTRAL);
        assert_eq!(LuckBand::VeryUnlucky.rgb(), RGB_BAD);
        assert_eq!(LuckBand::Unknown.rgb(), RGB_UNKNOWN);
        assert_eq!(LuckBand::Lucky(0.0).rgb(), RGB_NEUTRAL);
        assert_eq!(LuckBand::Lucky(1.0).rgb(), RGB_GOOD);
        assert_eq!(LuckBand::Unlucky(0.0).rgb(), RGB_BAD);
        assert_eq!(LuckBand::Unlucky(1.0).rgb(), RGB_NEUTRAL);
    }

    #[test]
    fn test_rgb_blend_is_clamped() {
        assert_eq!(LuckBand::Lucky(5.0).rgb(), RGB_GOOD);
        assert_eq!(LuckBand::Unlucky(-2.0).rgb(), RGB_BAD);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LuckBand::VeryLucky.label(), "very lucky");
        assert_eq!(LuckBand::Unlucky(0.2).label(), "unlucky");
        assert_eq!(LuckBand::Unknown.label(), "unknown");
    }
}
