//! Numeric quantization and clamping helpers.

/// Quantizes to 2 decimal places, rounding halves up.
///
/// Standalone band boundaries are emitted at this precision.
pub fn quantize2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Quantizes to 4 decimal places, rounding halves up.
///
/// Deviation-band boundaries (nutrition rules) use this precision.
pub fn quantize4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Clamps a computed lower bound to 0; measured quantities are never negative.
pub fn clamp_lower_to_zero(x: f64) -> f64 {
    if x < 0.0 { 0.0 } else { x }
}

/// Formats a value with exactly two decimal places for display.
pub fn format2(x: f64) -> String {
    format!("{x:.2}")
}
