//! Audio analysis algorithms
//!
//! - MFCC (cepstral embeddings)

mod mfcc;

pub use mfcc::{mfcc_embedding, BoundMfcc, Embedding, Mfcc, MfccMatrix, MfccParams, N_MFCC};
