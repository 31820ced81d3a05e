//! Error types for the spectral transform and the dataset layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or applying the MFCC transform.
#[derive(Debug, Error)]
pub enum MfccError {
    #[error("compute device {device} is unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("waveform too short: need more than {min_samples} samples per channel, got {samples}")]
    WaveformTooShort { samples: usize, min_samples: usize },

    #[error("waveform has no channels")]
    EmptyWaveform,

    #[error("invalid MFCC parameters: {0}")]
    InvalidParams(String),
}

/// Errors raised by the dataset loader before any audio is decoded.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("audio directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("batch length mismatch: {paths} paths but {embeddings} embeddings")]
    LengthMismatch { paths: usize, embeddings: usize },
}
