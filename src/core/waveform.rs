//! In-memory audio signal handed to the embedding transform

use crate::error::MfccError;

/// De-interleaved audio samples, `[channel][sample]`
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl Waveform {
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Build from per-channel sample vectors. All channels must have the
    /// same length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, MfccError> {
        if let Some(first) = channels.first() {
            if let Some(bad) = channels.iter().find(|c| c.len() != first.len()) {
                return Err(MfccError::InvalidParams(format!(
                    "ragged channels: {} vs {} samples",
                    first.len(),
                    bad.len()
                )));
            }
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Split interleaved samples into channels. Trailing samples that do not
    /// fill a whole frame are dropped.
    pub fn from_interleaved(samples: &[f32], num_channels: usize, sample_rate: u32) -> Self {
        let num_channels = num_channels.max(1);
        let frames = samples.len() / num_channels;
        let channels = (0..num_channels)
            .map(|ch| (0..frames).map(|i| samples[i * num_channels + ch]).collect())
            .collect();
        Self {
            channels,
            sample_rate,
        }
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Average all channels into one
    pub fn to_mono(&self) -> Self {
        if self.channels.len() <= 1 {
            return self.clone();
        }

        let scale = 1.0 / self.channels.len() as f32;
        let mono = (0..self.len())
            .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() * scale)
            .collect();

        Self::mono(mono, self.sample_rate)
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}
