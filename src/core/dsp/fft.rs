//! Short-time Fourier transform with centered, reflect-padded frames

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::windows::hann_window;
use crate::core::device::Executor;
use crate::error::MfccError;

/// Power STFT over Hann-windowed frames.
///
/// Frames are centered: the signal is reflect-padded by `fft_size / 2` on
/// both sides, so a signal of `n` samples yields `1 + n / hop_size` frames.
pub struct StftProcessor {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    fft_size: usize,
    hop_size: usize,
}

impl StftProcessor {
    pub fn new(fft_size: usize, hop_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(fft_size),
            window: hann_window(fft_size),
            fft_size,
            hop_size,
        }
    }

    /// Number of one-sided frequency bins per frame
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    pub fn num_frames(&self, num_samples: usize) -> usize {
        1 + num_samples / self.hop_size
    }

    /// Smallest signal length the reflect padding accepts
    pub fn min_samples(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Compute the power spectrum of every frame and hand it to `reduce`.
    ///
    /// Frames are dispatched through `exec`; the output is always in frame
    /// order regardless of the executor.
    pub fn map_frames<T, F>(
        &self,
        samples: &[f32],
        exec: &Executor,
        reduce: F,
    ) -> Result<Vec<T>, MfccError>
    where
        T: Send,
        F: Fn(&[f32]) -> T + Sync + Send,
    {
        if samples.len() < self.min_samples() {
            return Err(MfccError::WaveformTooShort {
                samples: samples.len(),
                min_samples: self.fft_size / 2,
            });
        }

        let padded = reflect_pad(samples, self.fft_size / 2);
        let num_frames = self.num_frames(samples.len());

        Ok(exec.map_indices(num_frames, |frame| {
            let start = frame * self.hop_size;
            let power = self.power_spectrum(&padded[start..start + self.fft_size]);
            reduce(&power)
        }))
    }

    /// |X|^2 for bins `0..=fft_size / 2` of one windowed frame
    fn power_spectrum(&self, frame: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = frame
            .iter()
            .zip(self.window.iter())
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();

        self.fft.process(&mut buffer);

        buffer[..self.num_bins()]
            .iter()
            .map(|c| c.norm_sqr())
            .collect()
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }
}

/// Reflect-pad `samples` by `pad` on each side, excluding the edge sample.
///
/// Caller guarantees `samples.len() > pad`.
pub fn reflect_pad(samples: &[f32], pad: usize) -> Vec<f32> {
    let n = samples.len();
    let mut padded = Vec::with_capacity(n + 2 * pad);
    padded.extend((1..=pad).rev().map(|i| samples[i]));
    padded.extend_from_slice(samples);
    padded.extend((0..pad).map(|j| samples[n - 2 - j]));
    padded
}
