//! Core analysis modules

pub mod analysis;
pub mod decoder;
pub mod device;
pub mod dsp;
pub mod waveform;

pub use analysis::{mfcc_embedding, BoundMfcc, Embedding, Mfcc, MfccMatrix, MfccParams, N_MFCC};
pub use decoder::{decode_audio, AudioData};
pub use device::{Device, Executor};
pub use waveform::Waveform;
