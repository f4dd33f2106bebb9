//! Weighted smoothing stage.

use super::types::{Mask, Window};

/// Applied once after the weighted sum.
pub const NORMALIZATION_DIVISOR: f64 = 10.0;

pub fn weighted_sum(window: &Window, mask: &Mask) -> i64 {
    window
        .samples()
        .iter()
        .zip(mask.weights())
        .map(|(&sample, weight)| i64::from(sample) * i64::from(weight))
        .sum()
}

/// Floating-point division truncated toward zero. Out-of-range quotients
/// saturate at the `i32` bounds.
pub fn normalize(total: i64) -> i32 {
    (total as f64 / NORMALIZATION_DIVISOR) as i32
}
