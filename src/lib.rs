//! mfcc-embed - Time-averaged MFCC embeddings for audio collections
//!
//! Walks a directory of audio files, decodes each one, and reduces it to a
//! single fixed-length Mel-Frequency Cepstral Coefficient vector.
//!
//! ## Features
//!
//! - **Fixed reference transform**: 104 coefficients, 2048-point FFT, hop 512,
//!   128 HTK mel bands, 80 dB dynamic range, orthonormal DCT-II
//! - **Explicit devices**: single-threaded or frame-parallel on a rayon pool,
//!   with identical output
//! - **Pluggable loaders**: the driver talks to any [`DatasetLoader`];
//!   [`AudioFolder`] handles directories on disk
//! - **Streaming**: [`stream_embeddings`] holds one batch at a time
//!
//! ## Module Structure
//!
//! - `core` - Decoding, DSP primitives, the MFCC transform and devices
//! - `dataset` - Loader trait, batches and the folder loader
//! - `extract` - The batch driver
//! - `config` - Run settings
//! - `cli` - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mfcc_embed::{get_embeddings, AudioFolder, Device, ExtractConfig};
//!
//! let config = ExtractConfig::builder().device(Device::detect()).build();
//! let records = get_embeddings(&AudioFolder::default(), "music/", &config)?;
//!
//! for record in &records {
//!     println!("{}: {} coefficients", record.path.display(), record.embedding.len());
//! }
//! ```

// Core analysis functionality
pub mod core;

// Dataset loading
pub mod dataset;

// Batch extraction driver
pub mod extract;

// Command-line interface
pub mod cli;

// Configuration
pub mod config;

// Error types
pub mod error;

// Re-export commonly used types at crate root for convenience
pub use crate::config::{DatasetConfig, ExtractConfig, ExtractConfigBuilder};
pub use crate::core::{mfcc_embedding, Device, Embedding, Mfcc, MfccParams, Waveform, N_MFCC};
pub use crate::dataset::{AudioFolder, Batch, DatasetLoader, ItemTransform};
pub use crate::error::{DatasetError, MfccError};
pub use crate::extract::{
    embedding_transform, get_embeddings, stream_embeddings, EmbeddingRecord, EmbeddingStream,
};
