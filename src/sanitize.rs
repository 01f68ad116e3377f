//! Data Sanitization
//!
//! Numerical stability utilities. Every value the engine exposes passes
//! through here: non-finite intermediates become neutral defaults and
//! record invariants are enforced by clamping at the end of each update.

use crate::types::STABILITY_FLOOR;

/// Replace NaN/Inf with 0.0
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Ratio that treats a zero or non-finite denominator as 0 instead of
/// propagating Inf/NaN
pub fn safe_ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 || !den.is_finite() {
        return 0.0;
    }
    finite_or_zero(num / den)
}

/// Clamp stability to a finite non-negative value
pub fn clamp_stability(s: f64) -> f64 {
    finite_or_zero(s).max(0.0)
}

/// Clamp stability to the scheduler's post-update floor
pub fn floor_stability(s: f64) -> f64 {
    finite_or_zero(s).max(STABILITY_FLOOR)
}

/// Clamp a mastery score into [0, 100], rounding toward the nearest integer
pub fn clamp_mastery(score: f64) -> i32 {
    finite_or_zero(score).round().clamp(0.0, 100.0) as i32
}
