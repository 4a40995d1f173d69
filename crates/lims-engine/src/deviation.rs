//! Deviation-band policies: target ± deviation, clamped at zero.
//!
//! Unlike the fixed-multiplier bands, deviation bands produce exactly one
//! perfect band `[lower, upper]` and one not-OK band (`< lower OR > upper`).
//! The deviation itself is policy-driven per parameter family.

use crate::numeric::{clamp_lower_to_zero, quantize4};

/// Relative deviation used by the energy policy and above piecewise
/// thresholds: ±20% of target.
pub const RELATIVE_DEVIATION_FACTOR: f64 = 0.20;

/// Fallback when a percent-deviation parameter has no deviation% supplied.
pub const DEFAULT_DEVIATION_PERCENT: f64 = 10.0;

/// Allowed range for a user-supplied deviation percentage.
pub const DEVIATION_PERCENT_MAX: f64 = 50.0;

/// How a parameter family derives its absolute deviation from the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviationPolicy {
    /// Flat ±20% of target.
    Energy,
    /// Absolute floor below `low_threshold`, ±20% between the thresholds,
    /// absolute ceiling above `high_threshold`.
    Piecewise {
        low_threshold: f64,
        high_threshold: f64,
        low_abs: f64,
        high_abs: f64,
    },
    /// Absolute floor below `threshold`, ±20% at or above it.
    ThresholdFloor { threshold: f64, low_abs: f64 },
    /// ±(percent/100) of target, percent supplied by the user.
    Percent,
}

/// Computes the absolute deviation for a target under a policy.
///
/// `percent` is only consulted by [`DeviationPolicy::Percent`].
pub fn deviation_for(policy: DeviationPolicy, target: f64, percent: f64) -> f64 {
    match policy {
        DeviationPolicy::Energy => quantize4(target * RELATIVE_DEVIATION_FACTOR),
        DeviationPolicy::Piecewise {
            low_threshold,
            high_threshold,
            low_abs,
            high_abs,
        } => {
            if target < low_threshold {
                quantize4(low_abs)
            } else if target <= high_threshold {
                quantize4(target * RELATIVE_DEVIATION_FACTOR)
            } else {
                quantize4(high_abs)
            }
        }
        DeviationPolicy::ThresholdFloor { threshold, low_abs } => {
            if target < threshold {
                quantize4(low_abs)
            } else {
                quantize4(target * RELATIVE_DEVIATION_FACTOR)
            }
        }
        DeviationPolicy::Percent => quantize4(target * (percent / 100.0)),
    }
}

/// A perfect band `[lower, upper]` with correction flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
    /// Lower bound fell below 0 and was clamped.
    pub clamped: bool,
    /// Caller-supplied bounds arrived inverted and were swapped.
    pub swapped: bool,
}

/// Bounds around a target: `lower = clamp0(target - deviation)`,
/// `upper = target + deviation`.
pub fn compute_bounds(target: f64, deviation: f64) -> Bounds {
    let raw_lower = quantize4(target - deviation);
    let lower = clamp_lower_to_zero(raw_lower);
    Bounds {
        lower,
        upper: quantize4(target + deviation),
        clamped: raw_lower < 0.0,
        swapped: false,
    }
}

/// Normalizes an explicit bound pair: swaps inverted bounds, clamps
/// negatives to 0.
pub fn ordered_bounds(lower: f64, upper: f64) -> Bounds {
    let clamped = lower < 0.0 || upper < 0.0;
    let lower = clamp_lower_to_zero(quantize4(lower));
    let upper = clamp_lower_to_zero(quantize4(upper));
    if lower > upper {
        Bounds {
            lower: upper,
            upper: lower,
            clamped,
            swapped: true,
        }
    } else {
        Bounds {
            lower,
            upper,
            clamped,
            swapped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAT_TOTAL: DeviationPolicy = DeviationPolicy::Piecewise {
        low_threshold: 10.0,
        high_threshold: 40.0,
        low_abs: 1.5,
        high_abs: 8.0,
    };

    #[test]
    fn test_piecewise_selection() {
        assert_eq!(deviation_for(FAT_TOTAL, 5.0, 0.0), 1.5);
        assert_eq!(deviation_for(FAT_TOTAL, 20.0, 0.0), 4.0);
        assert_eq!(deviation_for(FAT_TOTAL, 40.0, 0.0), 8.0);
        assert_eq!(deviation_for(FAT_TOTAL, 80.0, 0.0), 8.0);
    }

    #[test]
    fn test_threshold_floor_selection() {
        let saturated = DeviationPolicy::ThresholdFloor {
            threshold: 4.0,
            low_abs: 0.8,
        };
        assert_eq!(deviation_for(saturated, 2.0, 0.0), 0.8);
        assert_eq!(deviation_for(saturated, 10.0, 0.0), 2.0);
    }

    #[test]
    fn test_percent_deviation() {
        assert_eq!(deviation_for(DeviationPolicy::Percent, 50.0, 10.0), 5.0);
        assert_eq!(deviation_for(DeviationPolicy::Energy, 100.0, 0.0), 20.0);
    }

    #[test]
    fn test_bounds_clamp_to_zero() {
        let bounds = compute_bounds(1.0, 1.5);
        assert_eq!(bounds.lower, 0.0);
        assert_eq!(bounds.upper, 2.5);
        assert!(bounds.clamped);
    }

    #[test]
    fn test_bounds_without_clamp() {
        let bounds = compute_bounds(20.0, 4.0);
        assert_eq!(bounds.lower, 16.0);
        assert_eq!(bounds.upper, 24.0);
        assert!(!bounds.clamped);
    }

    #[test]
    fn test_ordered_bounds_swap() {
        let bounds = ordered_bounds(5.0, 2.0);
        assert_eq!((bounds.lower, bounds.upper), (2.0, 5.0));
        assert!(bounds.swapped);

        let bounds = ordered_bounds(2.0, 5.0);
        assert!(!bounds.swapped);
    }
}
