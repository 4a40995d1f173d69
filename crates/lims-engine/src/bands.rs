//! Fixed-multiplier band boundaries around a target value.
//!
//! All boundaries are quantized to 2 decimal places before they reach a
//! rule. Callers must reject negative targets first; the formulas here are
//! only meaningful on the non-negative axis.

use crate::numeric::quantize2;

/// Lower OK boundary multiplier (active and mineral).
pub const LOW_OK_FACTOR: f64 = 0.80;
/// Lower perfect boundary multiplier (active and mineral).
pub const LOW_PERFECT_FACTOR: f64 = 0.90;
/// Upper perfect boundary multiplier (active and mineral).
pub const HIGH_PERFECT_FACTOR: f64 = 1.25;
/// Upper OK boundary multiplier for active targets.
pub const ACTIVE_HIGH_OK_FACTOR: f64 = 1.50;
/// Upper OK boundary multiplier for mineral targets.
pub const MINERAL_HIGH_OK_FACTOR: f64 = 1.45;
/// Perfect threshold multiplier for 3-band limits.
pub const LIMIT3_PERFECT_FACTOR: f64 = 0.30;

/// The four boundaries of a 4-band (active/mineral) target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBands {
    pub low_ok: f64,
    pub low_perfect: f64,
    pub high_perfect: f64,
    pub high_ok2: f64,
}

/// Band boundaries for an active target: 0.80/0.90/1.25/1.50 × target.
pub fn active_bands(target: f64) -> ActiveBands {
    ActiveBands {
        low_ok: quantize2(LOW_OK_FACTOR * target),
        low_perfect: quantize2(LOW_PERFECT_FACTOR * target),
        high_perfect: quantize2(HIGH_PERFECT_FACTOR * target),
        high_ok2: quantize2(ACTIVE_HIGH_OK_FACTOR * target),
    }
}

/// Band boundaries for a mineral target; the upper OK band ends at 1.45 × target.
pub fn mineral_bands(target: f64) -> ActiveBands {
    ActiveBands {
        high_ok2: quantize2(MINERAL_HIGH_OK_FACTOR * target),
        ..active_bands(target)
    }
}

/// Perfect threshold for a 3-band limit: 0.30 × target.
pub fn limit3_threshold(target: f64) -> f64 {
    quantize2(LIMIT3_PERFECT_FACTOR * target)
}
