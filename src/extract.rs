// src/extract.rs
//
// Batch driver: bind the embedding function to a device, pull batches from a
// dataset loader and turn them into (path, embedding) records.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;

use crate::config::ExtractConfig;
use crate::core::{BoundMfcc, Device, Embedding, Mfcc, MfccParams, Waveform};
use crate::dataset::{Batch, DatasetLoader, ItemTransform};

/// Embedding of one audio file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingRecord {
    pub path: PathBuf,
    pub embedding: Embedding,
}

/// The embedding function with `device` fixed, as a loader callback.
///
/// Equivalent to calling [`mfcc_embedding`](crate::core::mfcc_embedding)
/// with `device` on every item. The transform and its device are set up on
/// the first call and reused afterwards; a failed setup is retried.
pub fn embedding_transform(device: Device) -> ItemTransform {
    let bound: OnceLock<BoundMfcc> = OnceLock::new();
    Arc::new(move |waveform: &Waveform| {
        let mfcc = match bound.get() {
            Some(mfcc) => mfcc,
            None => {
                let fresh = Mfcc::new(MfccParams::default())?.to(device)?;
                bound.get_or_init(|| fresh)
            }
        };
        mfcc.embed(waveform)
    })
}

/// Compute embeddings for every file the loader finds under `audio_dir`.
///
/// Records come back in the loader's batch-then-item order. The first error
/// from the loader or from an item's embedding is returned as-is and no
/// records are returned with it.
pub fn get_embeddings<L: DatasetLoader>(
    loader: &L,
    audio_dir: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<Vec<EmbeddingRecord>> {
    stream_embeddings(loader, audio_dir, config)?.collect()
}

/// Lazy form of [`get_embeddings`]: only the current batch is held in memory.
pub fn stream_embeddings<L: DatasetLoader>(
    loader: &L,
    audio_dir: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<EmbeddingStream<L::Batches>> {
    let device = config.device;
    let transform = embedding_transform(device);
    let batches = loader.init_dataset(audio_dir.as_ref(), config.batch_size, transform)?;

    info!("Computing MFCC embeddings");
    info!("Using device: {}", device);

    let total = batches.len();
    let progress = if config.show_progress {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({eta})",
            )?
            .progress_chars("##-"),
        );
        bar.set_message("Extracting embeddings");
        bar
    } else {
        ProgressBar::hidden()
    };

    Ok(EmbeddingStream {
        batches,
        total,
        index: 0,
        pending: Batch::default().into_iter(),
        progress,
        done: false,
    })
}

/// Iterator over embedding records, pulling batches on demand
pub struct EmbeddingStream<I> {
    batches: I,
    total: usize,
    index: usize,
    pending: <Batch as IntoIterator>::IntoIter,
    progress: ProgressBar,
    done: bool,
}

impl<I> EmbeddingStream<I> {
    /// Number of batches the loader reported
    pub fn total_batches(&self) -> usize {
        self.total
    }

    /// Batches consumed so far
    pub fn batches_done(&self) -> usize {
        self.index
    }
}

impl<I> Iterator for EmbeddingStream<I>
where
    I: Iterator<Item = Result<Batch>>,
{
    type Item = Result<EmbeddingRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((path, embedding)) = self.pending.next() {
                info!("Computed MFCC embedding for {}", path.display());
                return Some(Ok(EmbeddingRecord { path, embedding }));
            }
            if self.done {
                return None;
            }

            match self.batches.next() {
                Some(Ok(batch)) => {
                    self.index += 1;
                    info!("Processing batch {}/{}", self.index, self.total);
                    self.progress.inc(1);
                    self.pending = batch.into_iter();
                }
                Some(Err(e)) => {
                    self.done = true;
                    self.progress.abandon();
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    self.progress.finish();
                    return None;
                }
            }
        }
    }
}
