//! CLI argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DatasetConfig, ExtractConfig, DEFAULT_BATCH_SIZE};
use crate::core::Device;

#[derive(Parser, Debug)]
#[command(name = "mfcc-embed")]
#[command(about = "Compute time-averaged MFCC embeddings for a directory of audio files")]
pub struct Args {
    /// Directory containing audio files
    pub input: PathBuf,

    /// Number of files per batch
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE, env = "MFCC_BATCH_SIZE", value_parser = parse_batch_size)]
    pub batch_size: usize,

    /// Compute device: auto, cpu, parallel or parallel:N
    #[arg(short, long, default_value = "auto", value_parser = parse_device)]
    pub device: Device,

    /// Resample audio to this rate before embedding (0 keeps the native rate)
    #[arg(long, default_value_t = 16000)]
    pub sample_rate: u32,

    /// Shuffle file order
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for --shuffle
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,

    /// Embed every channel instead of downmixing to mono first
    #[arg(long)]
    pub keep_channels: bool,

    /// Embed the files within a batch in parallel
    #[arg(long)]
    pub parallel_items: bool,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_links: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig::builder()
            .batch_size(self.batch_size)
            .device(self.device)
            .show_progress(!self.no_progress)
            .build()
    }

    pub fn dataset_config(&self) -> DatasetConfig {
        DatasetConfig {
            follow_links: self.follow_links,
            shuffle: self.shuffle,
            seed: self.seed,
            mono: !self.keep_channels,
            target_sample_rate: (self.sample_rate > 0).then_some(self.sample_rate),
            parallel_items: self.parallel_items,
            ..DatasetConfig::default()
        }
    }
}

fn parse_batch_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid batch size: {}", s)),
    }
}

fn parse_device(s: &str) -> Result<Device, String> {
    if s.eq_ignore_ascii_case("auto") {
        Ok(Device::detect())
    } else {
        s.parse()
    }
}
