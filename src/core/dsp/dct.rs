//! DCT-II basis for cepstral coefficients

use std::f64::consts::PI;

/// Orthonormal DCT-II basis, laid out `[num_coeffs][num_inputs]`.
///
/// Row `k` is `sqrt(2 / N) * cos(pi / N * (n + 0.5) * k)`, with row 0 scaled
/// by an extra `1 / sqrt(2)`.
pub fn dct_ii_ortho(num_coeffs: usize, num_inputs: usize) -> Vec<Vec<f32>> {
    let n = num_inputs as f64;
    let scale = (2.0 / n).sqrt();

    (0..num_coeffs)
        .map(|k| {
            let row_scale = if k == 0 { scale / 2f64.sqrt() } else { scale };
            (0..num_inputs)
                .map(|i| (row_scale * (PI / n * (i as f64 + 0.5) * k as f64).cos()) as f32)
                .collect()
        })
        .collect()
}

/// Project one input vector onto the basis.
pub fn apply_dct(basis: &[Vec<f32>], input: &[f32]) -> Vec<f32> {
    basis
        .iter()
        .map(|row| row.iter().zip(input).map(|(&b, &x)| b * x).sum())
        .collect()
}
