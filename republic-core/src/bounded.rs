//! Clamping for the percentage-scale stats.
//!
//! Seven of the country stats live on a 0..=100 scale. Every mutation path
//! in the engine finishes by pulling them back into range, so a caller can
//! never observe an out-of-range value.

/// Lower bound of a percentage stat.
pub const PERCENT_MIN: f64 = 0.0;

/// Upper bound of a percentage stat.
pub const PERCENT_MAX: f64 = 100.0;

/// Clamp a value to `[PERCENT_MIN, PERCENT_MAX]`.
///
/// `NaN` collapses to the lower bound (`f64::max` prefers the non-NaN side).
pub fn clamp_percent(value: f64) -> f64 {
    value.max(PERCENT_MIN).min(PERCENT_MAX)
}

/// Whether `value` is already inside the percentage range.
pub fn in_percent_range(value: f64) -> bool {
    (PERCENT_MIN..=PERCENT_MAX).contains(&value)
}
