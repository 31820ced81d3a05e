// src/core/analysis/mfcc.rs
//
// MFCC transform and the time-averaged embedding built on it

use log::debug;
use serde::Serialize;

use crate::core::device::{Device, Executor};
use crate::core::dsp::{
    apply_dct, apply_filter_bank, dct_ii_ortho, mel_filter_bank, power_to_db, StftProcessor,
};
use crate::core::waveform::Waveform;
use crate::error::MfccError;

/// Number of cepstral coefficients in an embedding
pub const N_MFCC: usize = 104;

/// MFCC analysis parameters
#[derive(Debug, Clone, PartialEq)]
pub struct MfccParams {
    pub num_coefficients: usize,
    pub num_mel_bands: usize,
    pub fft_size: usize,
    pub hop_size: usize,
    /// Rate the mel band edges are laid out for
    pub sample_rate: u32,
    pub f_min: f64,
    /// Defaults to Nyquist when `None`
    pub f_max: Option<f64>,
    /// Dynamic range kept below the loudest mel bin, in dB
    pub top_db: Option<f32>,
}

impl Default for MfccParams {
    fn default() -> Self {
        Self {
            num_coefficients: N_MFCC,
            num_mel_bands: 128,
            fft_size: 2048,
            hop_size: 512,
            sample_rate: 16000,
            f_min: 0.0,
            f_max: None,
            top_db: Some(80.0),
        }
    }
}

impl MfccParams {
    pub fn validate(&self) -> Result<(), MfccError> {
        let invalid = |msg: String| Err(MfccError::InvalidParams(msg));

        if self.num_coefficients == 0 || self.num_mel_bands == 0 {
            return invalid("coefficient and mel band counts must be positive".into());
        }
        if self.num_coefficients > self.num_mel_bands {
            return invalid(format!(
                "{} coefficients exceed {} mel bands",
                self.num_coefficients, self.num_mel_bands
            ));
        }
        if self.fft_size < 2 || self.hop_size == 0 || self.hop_size > self.fft_size {
            return invalid(format!(
                "fft_size {} / hop_size {} out of range",
                self.fft_size, self.hop_size
            ));
        }
        if self.sample_rate == 0 {
            return invalid("sample rate must be positive".into());
        }
        let f_max = self.f_max();
        if !(0.0..f_max).contains(&self.f_min) || f_max > self.sample_rate as f64 / 2.0 {
            return invalid(format!("band {}..{} Hz out of range", self.f_min, f_max));
        }
        Ok(())
    }

    pub fn f_max(&self) -> f64 {
        self.f_max.unwrap_or(self.sample_rate as f64 / 2.0)
    }
}

/// Cepstral coefficients of one channel, `[coefficient][frame]`
pub type MfccMatrix = Vec<Vec<f32>>;

/// Fixed-length time-averaged MFCC vector for one waveform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// MFCC transform: STFT power, mel filterbank, dB, DCT-II
pub struct Mfcc {
    params: MfccParams,
    stft: StftProcessor,
    mel_bank: Vec<Vec<f32>>,
    dct: Vec<Vec<f32>>,
}

impl Mfcc {
    pub fn new(params: MfccParams) -> Result<Self, MfccError> {
        params.validate()?;

        let stft = StftProcessor::new(params.fft_size, params.hop_size);
        let mel_bank = mel_filter_bank(
            stft.num_bins(),
            params.num_mel_bands,
            params.sample_rate,
            params.f_min,
            params.f_max(),
        );
        let dct = dct_ii_ortho(params.num_coefficients, params.num_mel_bands);

        Ok(Self {
            params,
            stft,
            mel_bank,
            dct,
        })
    }

    pub fn params(&self) -> &MfccParams {
        &self.params
    }

    /// Bind the transform to a compute device.
    pub fn to(self, device: Device) -> Result<BoundMfcc, MfccError> {
        let exec = device.bind()?;
        Ok(BoundMfcc {
            mfcc: self,
            device,
            exec,
        })
    }

    /// Per-channel coefficient matrices.
    ///
    /// The dB floor is computed over every channel together.
    pub fn transform(&self, waveform: &Waveform, exec: &Executor) -> Result<Vec<MfccMatrix>, MfccError> {
        if waveform.num_channels() == 0 {
            return Err(MfccError::EmptyWaveform);
        }
        if waveform.sample_rate() != self.params.sample_rate {
            debug!(
                "Waveform at {} Hz, mel bands laid out for {} Hz",
                waveform.sample_rate(),
                self.params.sample_rate
            );
        }

        let num_mels = self.params.num_mel_bands;
        let num_frames = self.stft.num_frames(waveform.len());

        // [channel][frame][mel], flattened
        let mut mel_db = Vec::with_capacity(waveform.num_channels() * num_frames * num_mels);
        for channel in waveform.channels() {
            let frames = self
                .stft
                .map_frames(channel, exec, |power| apply_filter_bank(&self.mel_bank, power))?;
            mel_db.extend(frames.into_iter().flatten());
        }
        power_to_db(&mut mel_db, self.params.top_db);

        let cepstra = exec.map_indices(mel_db.len() / num_mels, |i| {
            apply_dct(&self.dct, &mel_db[i * num_mels..(i + 1) * num_mels])
        });

        Ok(cepstra
            .chunks(num_frames)
            .map(|frames| {
                (0..self.params.num_coefficients)
                    .map(|k| frames.iter().map(|frame| frame[k]).collect())
                    .collect()
            })
            .collect())
    }

    /// Average the coefficient matrices over frames, then over channels.
    pub fn embed(&self, waveform: &Waveform, exec: &Executor) -> Result<Embedding, MfccError> {
        let matrices = self.transform(waveform, exec)?;
        let num_channels = matrices.len() as f64;

        let values = (0..self.params.num_coefficients)
            .map(|k| {
                let total: f64 = matrices
                    .iter()
                    .map(|m| mean(&m[k]))
                    .sum();
                (total / num_channels) as f32
            })
            .collect();

        Ok(Embedding(values))
    }
}

/// An `Mfcc` with its device resources acquired
pub struct BoundMfcc {
    mfcc: Mfcc,
    device: Device,
    exec: Executor,
}

impl BoundMfcc {
    pub fn device(&self) -> Device {
        self.device
    }

    pub fn transform(&self, waveform: &Waveform) -> Result<Vec<MfccMatrix>, MfccError> {
        self.mfcc.transform(waveform, &self.exec)
    }

    pub fn embed(&self, waveform: &Waveform) -> Result<Embedding, MfccError> {
        self.mfcc.embed(waveform, &self.exec)
    }
}

fn mean(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Time-averaged MFCC embedding of one waveform.
///
/// Builds a fresh transform with the reference parameters on every call
/// and runs it on `device`. The result always has [`N_MFCC`] values.
pub fn mfcc_embedding(waveform: &Waveform, device: Device) -> Result<Embedding, MfccError> {
    Mfcc::new(MfccParams::default())?.to(device)?.embed(waveform)
}
