use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Scratch directory of generated audio, removed on drop
pub struct TempAudioDir {
    path: PathBuf,
}

impl TempAudioDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("mfcc-embed-{}", Uuid::new_v4()));
        fs::create_dir_all(&path).expect("Failed to create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a 16-bit PCM sine tone. Every channel carries the same signal
    /// scaled by `1 / (channel + 1)`.
    pub fn write_tone(
        &self,
        name: &str,
        freq: f32,
        secs: f32,
        sample_rate: u32,
        channels: u16,
    ) -> PathBuf {
        let path = self.path.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }

        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("Failed to create wav");

        let frames = (secs * sample_rate as f32) as usize;
        for i in 0..frames {
            let s = 0.5 * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin();
            for ch in 0..channels {
                let scaled = s / (ch as f32 + 1.0);
                writer
                    .write_sample((scaled * i16::MAX as f32) as i16)
                    .expect("Failed to write sample");
            }
        }
        writer.finalize().expect("Failed to finalize wav");
        path
    }

    pub fn write_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, bytes).expect("Failed to write file");
        path
    }
}

impl Drop for TempAudioDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
