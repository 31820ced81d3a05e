// src/dataset/folder.rs
//
// Directory-backed dataset: walk, decode, downmix, resample, embed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use walkdir::WalkDir;

use super::{Batch, DatasetLoader, ItemTransform};
use crate::config::DatasetConfig;
use crate::core::dsp;
use crate::core::{decode_audio, Embedding, Waveform};
use crate::error::DatasetError;

/// Loader over every audio file below a directory
#[derive(Debug, Clone, Default)]
pub struct AudioFolder {
    config: Arc<DatasetConfig>,
}

impl AudioFolder {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Audio files below `dir`, sorted by path unless shuffling is enabled
    pub fn collect_audio_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(DatasetError::DirectoryNotFound(dir.to_path_buf()).into());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            if entry.file_type().is_file() && self.is_audio_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        if self.config.shuffle {
            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            files.shuffle(&mut rng);
        }

        Ok(files)
    }

    fn is_audio_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

impl DatasetLoader for AudioFolder {
    type Batches = AudioBatches;

    fn init_dataset(
        &self,
        audio_dir: &Path,
        batch_size: usize,
        transform: ItemTransform,
    ) -> Result<AudioBatches> {
        if batch_size == 0 {
            return Err(DatasetError::InvalidBatchSize.into());
        }

        let files = self.collect_audio_files(audio_dir)?;
        info!("Found {} audio file(s) in {}", files.len(), audio_dir.display());

        let chunks: Vec<Vec<PathBuf>> = files.chunks(batch_size).map(<[PathBuf]>::to_vec).collect();

        Ok(AudioBatches {
            chunks: chunks.into_iter(),
            config: Arc::clone(&self.config),
            transform,
        })
    }
}

/// Lazily decoded batches produced by [`AudioFolder`]
pub struct AudioBatches {
    chunks: std::vec::IntoIter<Vec<PathBuf>>,
    config: Arc<DatasetConfig>,
    transform: ItemTransform,
}

impl AudioBatches {
    fn load_batch(&self, paths: Vec<PathBuf>) -> Result<Batch> {
        let embeddings = if self.config.parallel_items {
            paths
                .par_iter()
                .map(|path| self.load_item(path))
                .collect::<Result<Vec<_>>>()?
        } else {
            paths
                .iter()
                .map(|path| self.load_item(path))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Batch::new(paths, embeddings)?)
    }

    fn load_item(&self, path: &Path) -> Result<Embedding> {
        let mut waveform = decode_audio(path)?.into_waveform();

        if self.config.mono {
            waveform = waveform.to_mono();
        }

        if let Some(target) = self.config.target_sample_rate {
            if waveform.sample_rate() != target {
                debug!(
                    "Resampling {} from {} Hz to {} Hz",
                    path.display(),
                    waveform.sample_rate(),
                    target
                );
                let channels = dsp::resample(waveform.channels(), waveform.sample_rate(), target)
                    .with_context(|| format!("Failed to resample {}", path.display()))?;
                waveform = Waveform::from_channels(channels, target)?;
            }
        }

        (self.transform)(&waveform)
            .with_context(|| format!("Failed to compute embedding for {}", path.display()))
    }
}

impl Iterator for AudioBatches {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        let paths = self.chunks.next()?;
        Some(self.load_batch(paths))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for AudioBatches {}
