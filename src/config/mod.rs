//! Configuration module for mfcc-embed

mod settings;

pub use settings::{
    DatasetConfig, ExtractConfig, ExtractConfigBuilder, AUDIO_EXTENSIONS, DEFAULT_BATCH_SIZE,
};
