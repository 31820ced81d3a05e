//! Window function implementations

use std::f32::consts::PI;

/// Periodic Hann window of `size` points.
///
/// The denominator is `size`, not `size - 1`.
pub fn hann_window(size: usize) -> Vec<f32> {
    if size <= 1 {
        return vec![1.0; size];
    }
    let n = size as f32;
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / n).cos()))
        .collect()
}
