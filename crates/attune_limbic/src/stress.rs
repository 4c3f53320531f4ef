//! Vocal stress estimation from raw 16-bit PCM.
//!
//! Two features are extracted per buffer: total energy (sum of squares) and
//! the number of sign changes between adjacent samples. Both are squashed by
//! fixed calibration divisors, averaged, and bucketed into Low/Medium/High.
//!
//! The divisors are fixed calibration constants, independent of sample rate
//! and clip duration.

use attune_core::{StressEstimate, StressLevel};
use chrono::Utc;

/// Energy divisor applied before clamping.
pub const ENERGY_DIVISOR: f64 = 1_000_000.0;
/// Zero-crossing divisor applied before clamping.
pub const ZCR_DIVISOR: f64 = 1_000.0;
/// Upper clamp for each normalized feature.
pub const FEATURE_CAP: f64 = 10.0;
/// Scores at or above this are at least Medium.
pub const MEDIUM_THRESHOLD: f64 = 2.0;
/// Scores at or above this are High.
pub const HIGH_THRESHOLD: f64 = 5.0;

/// Stateless estimator; holds no history between buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StressEstimator;

impl StressEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn estimate(&self, signal: &[i16]) -> StressEstimate {
        let raw_energy = energy(signal);
        let raw_zero_crossings = zero_crossings(signal);
        let level = classify(stress_score(raw_energy, raw_zero_crossings));

        tracing::debug!(
            "Stress estimate over {} samples: energy={}, zcr={}, level={}",
            signal.len(),
            raw_energy,
            raw_zero_crossings,
            level
        );

        StressEstimate {
            level,
            raw_energy,
            raw_zero_crossings,
            estimated_at: Utc::now(),
        }
    }
}

/// Sum of squared samples, accumulated exactly in integers.
pub fn energy(signal: &[i16]) -> f64 {
    let total: u128 = signal
        .iter()
        .map(|&s| {
            let s = i64::from(s);
            (s * s) as u128
        })
        .sum();
    total as f64
}

/// Count of adjacent pairs whose signs differ.
///
/// Zero is its own sign class: `0 → 5` and `5 → 0` each count as a
/// crossing, `0 → 0` does not, and `-3 → 4` counts once.
pub fn zero_crossings(signal: &[i16]) -> u64 {
    signal
        .windows(2)
        .filter(|pair| pair[0].signum() != pair[1].signum())
        .count() as u64
}

/// Combined score in `[0, 10]`.
pub fn stress_score(energy: f64, zero_crossings: u64) -> f64 {
    let norm_energy = (energy / ENERGY_DIVISOR).min(FEATURE_CAP);
    let norm_zcr = (zero_crossings as f64 / ZCR_DIVISOR).min(FEATURE_CAP);
    (norm_energy + norm_zcr) / 2.0
}

/// Bucket a score; both thresholds are inclusive lower bounds.
pub fn classify(score: f64) -> StressLevel {
    if score >= HIGH_THRESHOLD {
        StressLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        StressLevel::Medium
    } else {
        StressLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signal_is_low() {
        let est = StressEstimator::new().estimate(&[]);
        assert_eq!(est.level, StressLevel::Low);
        assert_eq!(est.raw_energy, 0.0);
        assert_eq!(est.raw_zero_crossings, 0);
    }

    #[test]
    fn test_energy_is_sum_of_squares() {
        assert_eq!(energy(&[3, -4]), 25.0);
        // No i16 overflow at the extremes
        assert_eq!(energy(&[i16::MIN, i16::MIN]), 2.0 * 32768.0 * 32768.0);
    }

    #[test]
    fn test_zero_crossing_convention() {
        assert_eq!(zero_crossings(&[1, -1, 1, -1]), 3);
        assert_eq!(zero_crossings(&[0, 5]), 1);
        assert_eq!(zero_crossings(&[5, 0]), 1);
        assert_eq!(zero_crossings(&[-5, 0, 5]), 2);
        assert_eq!(zero_crossings(&[0, 0, 0]), 0);
        assert_eq!(zero_crossings(&[7]), 0);
        assert_eq!(zero_crossings(&[2, 9, 100]), 0);
    }

    #[test]
    fn test_score_exactly_two_is_medium() {
        // 2000^2 = 4e6 → norm_energy 4.0, no crossings → score 2.0
        let est = StressEstimator::new().estimate(&[2000]);
        assert_eq!(stress_score(est.raw_energy, est.raw_zero_crossings), 2.0);
        assert_eq!(est.level, StressLevel::Medium);
    }

    #[test]
    fn test_score_exactly_five_is_high() {
        // ten samples of 1000 → 1e7 → norm_energy 10.0 → score 5.0
        let est = StressEstimator::new().estimate(&[1000; 10]);
        assert_eq!(stress_score(est.raw_energy, est.raw_zero_crossings), 5.0);
        assert_eq!(est.level, StressLevel::High);
    }

    #[test]
    fn test_just_below_thresholds() {
        assert_eq!(classify(1.999_999), StressLevel::Low);
        assert_eq!(classify(4.999_999), StressLevel::Medium);
        assert_eq!(classify(f64::NAN), StressLevel::Low);
    }

    #[test]
    fn test_features_are_capped() {
        // Both features saturate at 10 → score 10
        assert_eq!(stress_score(1e12, 1_000_000), 10.0);
        assert_eq!(classify(10.0), StressLevel::High);
    }

    #[test]
    fn test_zero_crossings_alone_can_raise_stress() {
        // 4001 alternating ±1 samples: 4000 crossings, negligible energy → score just over 2
        let signal: Vec<i16> = (0..4001).map(|i| if i % 2 == 0 { 1 } else { -1 }).collect();
        let est = StressEstimator::new().estimate(&signal);
        assert_eq!(est.raw_zero_crossings, 4000);
        assert_eq!(est.level, StressLevel::Medium);
    }
}
