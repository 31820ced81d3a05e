//! Mel-scale utilities, filterbank generation and dB conversion.

/// Converts frequency in Hz to the HTK mel scale.
pub fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Converts HTK mel scale frequency back to Hz.
pub fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank.
///
/// Returns `[num_mels][num_bins]`. Filter edges are spaced evenly on the
/// HTK mel scale between `f_min` and `f_max`; bin centers are
/// `linspace(0, sample_rate / 2, num_bins)`. Filters are not area-normalized.
pub fn mel_filter_bank(
    num_bins: usize,
    num_mels: usize,
    sample_rate: u32,
    f_min: f64,
    f_max: f64,
) -> Vec<Vec<f32>> {
    let nyquist = sample_rate as f64 / 2.0;
    let bin_freqs: Vec<f64> = (0..num_bins)
        .map(|k| {
            if num_bins > 1 {
                nyquist * k as f64 / (num_bins - 1) as f64
            } else {
                0.0
            }
        })
        .collect();

    let low_mel = hz_to_mel(f_min);
    let high_mel = hz_to_mel(f_max);
    let step = (high_mel - low_mel) / (num_mels + 1) as f64;
    let edges: Vec<f64> = (0..num_mels + 2)
        .map(|i| mel_to_hz(low_mel + i as f64 * step))
        .collect();

    (0..num_mels)
        .map(|m| {
            let (left, center, right) = (edges[m], edges[m + 1], edges[m + 2]);
            bin_freqs
                .iter()
                .map(|&f| {
                    let rising = (f - left) / (center - left);
                    let falling = (right - f) / (right - center);
                    rising.min(falling).max(0.0) as f32
                })
                .collect()
        })
        .collect()
}

/// Apply the filterbank to one power spectrum frame.
pub fn apply_filter_bank(bank: &[Vec<f32>], power: &[f32]) -> Vec<f32> {
    bank.iter()
        .map(|filter| filter.iter().zip(power).map(|(&w, &p)| w * p).sum())
        .collect()
}

const AMIN: f32 = 1e-10;

/// Convert power values to decibels in place, then floor them at
/// `max - top_db` where `max` is taken over the whole slice.
pub fn power_to_db(values: &mut [f32], top_db: Option<f32>) {
    for v in values.iter_mut() {
        *v = 10.0 * v.max(AMIN).log10();
    }

    if let Some(top_db) = top_db {
        let peak = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let floor = peak - top_db;
        for v in values.iter_mut() {
            *v = v.max(floor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hz_mel_roundtrip() {
        for &hz in &[0.0, 100.0, 440.0, 1000.0, 4000.0, 8000.0] {
            let mel = hz_to_mel(hz);
            let back = mel_to_hz(mel);
            assert!((hz - back).abs() < 1e-6, "roundtrip failed for {} Hz", hz);
        }
    }

    #[test]
    fn test_mel_filter_bank_shape() {
        let bank = mel_filter_bank(1025, 128, 16000, 0.0, 8000.0);
        assert_eq!(bank.len(), 128);
        assert_eq!(bank[0].len(), 1025);

        for filter in &bank {
            for &v in filter {
                assert!((0.0..=1.0).contains(&v));
            }
            // At 2048-point resolution every filter covers at least one bin
            assert!(filter.iter().any(|&v| v > 0.0));
        }
    }

    #[test]
    fn test_filters_peak_in_order() {
        let bank = mel_filter_bank(1025, 128, 16000, 0.0, 8000.0);
        let peaks: Vec<usize> = bank
            .iter()
            .map(|f| {
                f.iter()
                    .enumerate()
                    .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                    .map(|(i, _)| i)
                    .unwrap()
            })
            .collect();
        for pair in peaks.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_power_to_db_floor() {
        let mut values = vec![1.0, 1e-3, 1e-12, 0.0];
        power_to_db(&mut values, Some(80.0));
        assert!((values[0] - 0.0).abs() < 1e-4);
        assert!((values[1] + 30.0).abs() < 1e-3);
        // 1e-12 and 0 clamp to amin (-100 dB), then floor at -80 dB
        assert!((values[2] + 80.0).abs() < 1e-4);
        assert!((values[3] + 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_power_to_db_without_floor() {
        let mut values = vec![0.0];
        power_to_db(&mut values, None);
        assert!((values[0] + 100.0).abs() < 1e-3);
    }
}
