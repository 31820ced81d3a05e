// src/config/settings.rs
//
// Run-level settings for the extraction driver and the folder loader

use crate::core::Device;

/// Default number of files per batch
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Extensions the folder loader treats as audio
pub const AUDIO_EXTENSIONS: &[&str] = &["flac", "wav", "mp3", "ogg", "m4a", "aac", "aiff", "aif"];

/// Settings for one extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Files grouped per loader step
    pub batch_size: usize,
    /// Device every item is embedded on
    pub device: Device,
    /// Draw a progress bar over batches
    pub show_progress: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            device: Device::Cpu,
            show_progress: true,
        }
    }
}

impl ExtractConfig {
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for [`ExtractConfig`]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ExtractConfig::default(),
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    pub fn device(mut self, device: Device) -> Self {
        self.config.device = device;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// How the folder loader discovers and prepares audio
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    /// Lowercase extensions, without the dot
    pub extensions: Vec<String>,
    pub follow_links: bool,
    pub shuffle: bool,
    /// Fixed shuffle seed; entropy is used when `None`
    pub seed: Option<u64>,
    /// Average channels before embedding
    pub mono: bool,
    /// Resample to this rate; `None` keeps the file's native rate
    pub target_sample_rate: Option<u32>,
    /// Embed the items of a batch on the rayon pool
    pub parallel_items: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            extensions: AUDIO_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            follow_links: false,
            shuffle: false,
            seed: None,
            mono: true,
            target_sample_rate: Some(16000),
            parallel_items: false,
        }
    }
}
