//! Digital Signal Processing utilities

mod dct;
mod fft;
mod mel;
mod resample;
mod windows;

pub use dct::{apply_dct, dct_ii_ortho};
pub use fft::{reflect_pad, StftProcessor};
pub use mel::{apply_filter_bank, hz_to_mel, mel_filter_bank, mel_to_hz, power_to_db};
pub use resample::resample;
pub use windows::hann_window;
