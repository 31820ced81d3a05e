use std::path::PathBuf;

use crate::core::Embedding;
use crate::error::DatasetError;

/// One loader step: file paths and their embeddings, index-aligned
#[derive(Debug, Clone, Default)]
pub struct Batch {
    paths: Vec<PathBuf>,
    embeddings: Vec<Embedding>,
}

impl Batch {
    pub fn new(paths: Vec<PathBuf>, embeddings: Vec<Embedding>) -> Result<Self, DatasetError> {
        if paths.len() != embeddings.len() {
            return Err(DatasetError::LengthMismatch {
                paths: paths.len(),
                embeddings: embeddings.len(),
            });
        }
        Ok(Self { paths, embeddings })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn embeddings(&self) -> &[Embedding] {
        &self.embeddings
    }

    pub fn into_parts(self) -> (Vec<PathBuf>, Vec<Embedding>) {
        (self.paths, self.embeddings)
    }
}

impl IntoIterator for Batch {
    type Item = (PathBuf, Embedding);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<PathBuf>, std::vec::IntoIter<Embedding>>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter().zip(self.embeddings)
    }
}
