//! Dataset loading: file discovery, decoding and batching
//!
//! The extraction driver only sees the [`DatasetLoader`] trait. It hands the
//! loader a per-item [`ItemTransform`] and receives [`Batch`]es of
//! (path, embedding) pairs back. [`AudioFolder`] is the loader used for
//! directories of audio files on disk.

mod batch;
mod folder;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::core::{Embedding, Waveform};
use crate::error::MfccError;

pub use batch::Batch;
pub use folder::{AudioBatches, AudioFolder};

/// Per-item callback the loader applies to each decoded waveform
pub type ItemTransform = Arc<dyn Fn(&Waveform) -> Result<Embedding, MfccError> + Send + Sync>;

/// Source of embedding batches for a directory.
///
/// `Batches::len()` is the total number of batches the iterator will yield.
/// Every yielded [`Batch`] has as many embeddings as paths.
pub trait DatasetLoader {
    type Batches: ExactSizeIterator<Item = Result<Batch>>;

    fn init_dataset(
        &self,
        audio_dir: &Path,
        batch_size: usize,
        transform: ItemTransform,
    ) -> Result<Self::Batches>;
}
