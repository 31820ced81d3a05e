// tests/extraction_test.rs
//
// End-to-end extraction over generated WAV directories.

mod test_utils;

use std::collections::BTreeMap;
use std::path::PathBuf;

use mfcc_embed::{
    get_embeddings, stream_embeddings, AudioFolder, DatasetConfig, DatasetError, Device,
    EmbeddingRecord, ExtractConfig, MfccError, N_MFCC,
};
use test_utils::TempAudioDir;

fn config(batch_size: usize) -> ExtractConfig {
    ExtractConfig::builder()
        .batch_size(batch_size)
        .show_progress(false)
        .build()
}

fn file_names(records: &[EmbeddingRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn three_tones() -> TempAudioDir {
    let dir = TempAudioDir::new();
    dir.write_tone("a.wav", 220.0, 0.5, 16000, 1);
    dir.write_tone("b.wav", 440.0, 0.5, 16000, 1);
    dir.write_tone("c.wav", 880.0, 0.5, 16000, 1);
    dir
}

#[test]
fn test_three_files_two_batches() {
    let dir = three_tones();
    let loader = AudioFolder::default();

    let stream = stream_embeddings(&loader, dir.path(), &config(2)).unwrap();
    assert_eq!(stream.total_batches(), 2);

    let records: Vec<_> = stream.collect::<anyhow::Result<_>>().unwrap();
    assert_eq!(file_names(&records), vec!["a.wav", "b.wav", "c.wav"]);
    for record in &records {
        assert_eq!(record.embedding.len(), N_MFCC);
        assert!(record.embedding.as_slice().iter().all(|v| v.is_finite()));
    }

    // Different tones should not collapse onto the same vector
    assert_ne!(records[0].embedding, records[2].embedding);
}

#[test]
fn test_empty_directory() {
    let dir = TempAudioDir::new();
    let records = get_embeddings(&AudioFolder::default(), dir.path(), &config(32)).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_non_audio_files_are_skipped() {
    let dir = three_tones();
    dir.write_bytes("notes.txt", b"not audio");
    dir.write_bytes("cover.jpg", &[0xff, 0xd8, 0xff]);

    let records = get_embeddings(&AudioFolder::default(), dir.path(), &config(32)).unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn test_nested_directories() {
    let dir = TempAudioDir::new();
    dir.write_tone("disc1/01.wav", 300.0, 0.3, 16000, 1);
    dir.write_tone("disc2/01.wav", 600.0, 0.3, 16000, 1);
    dir.write_tone("top.WAV", 900.0, 0.3, 16000, 1);

    let records = get_embeddings(&AudioFolder::default(), dir.path(), &config(2)).unwrap();
    let relative: Vec<PathBuf> = records
        .iter()
        .map(|r| r.path.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("disc1/01.wav"),
            PathBuf::from("disc2/01.wav"),
            PathBuf::from("top.WAV"),
        ]
    );
}

#[test]
fn test_batch_size_does_not_change_results() {
    let dir = three_tones();
    dir.write_tone("d.wav", 1760.0, 0.5, 16000, 1);
    let loader = AudioFolder::default();

    let baseline: BTreeMap<_, _> = get_embeddings(&loader, dir.path(), &config(1))
        .unwrap()
        .into_iter()
        .map(|r| (r.path, r.embedding))
        .collect();
    assert_eq!(baseline.len(), 4);

    for batch_size in [2, 3, 16, 32] {
        let other: BTreeMap<_, _> = get_embeddings(&loader, dir.path(), &config(batch_size))
            .unwrap()
            .into_iter()
            .map(|r| (r.path, r.embedding))
            .collect();
        assert_eq!(baseline, other, "batch size {}", batch_size);
    }
}

#[test]
fn test_corrupt_file_aborts_run() {
    let dir = three_tones();
    dir.write_bytes("broken.wav", b"RIFF this is not really a wave file");

    let result = get_embeddings(&AudioFolder::default(), dir.path(), &config(1));
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("broken.wav"));
}

#[test]
fn test_too_short_file_aborts_run() {
    let dir = three_tones();
    // 500 samples at 16 kHz cannot fill half an analysis window
    dir.write_tone("blip.wav", 440.0, 500.0 / 16000.0, 16000, 1);

    let err = get_embeddings(&AudioFolder::default(), dir.path(), &config(4)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MfccError>(),
        Some(MfccError::WaveformTooShort { samples: 500, .. })
    ));
}

#[test]
fn test_missing_directory() {
    let dir = TempAudioDir::new();
    let missing = dir.path().join("nope");

    let err = get_embeddings(&AudioFolder::default(), &missing, &config(4)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::DirectoryNotFound(_))
    ));
}

#[test]
fn test_unavailable_device_aborts_run() {
    let dir = three_tones();
    let config = ExtractConfig::builder()
        .device(Device::Parallel { threads: 0 })
        .show_progress(false)
        .build();

    let err = get_embeddings(&AudioFolder::default(), dir.path(), &config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MfccError>(),
        Some(MfccError::DeviceUnavailable { .. })
    ));
}

#[test]
fn test_devices_produce_identical_records() {
    let dir = three_tones();
    let loader = AudioFolder::default();

    let cpu = get_embeddings(&loader, dir.path(), &config(2)).unwrap();
    let parallel = get_embeddings(
        &loader,
        dir.path(),
        &ExtractConfig::builder()
            .batch_size(2)
            .device(Device::Parallel { threads: 2 })
            .show_progress(false)
            .build(),
    )
    .unwrap();

    assert_eq!(cpu, parallel);
}

#[test]
fn test_parallel_items_preserve_order() {
    let dir = three_tones();
    let sequential = get_embeddings(&AudioFolder::default(), dir.path(), &config(3)).unwrap();

    let loader = AudioFolder::new(DatasetConfig {
        parallel_items: true,
        ..DatasetConfig::default()
    });
    let parallel = get_embeddings(&loader, dir.path(), &config(3)).unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_seeded_shuffle_is_reproducible() {
    let dir = TempAudioDir::new();
    for i in 0..8 {
        dir.write_tone(&format!("{}.wav", i), 200.0 + 100.0 * i as f32, 0.2, 16000, 1);
    }
    let loader = AudioFolder::new(DatasetConfig {
        shuffle: true,
        seed: Some(42),
        ..DatasetConfig::default()
    });

    let first = file_names(&get_embeddings(&loader, dir.path(), &config(3)).unwrap());
    let second = file_names(&get_embeddings(&loader, dir.path(), &config(3)).unwrap());
    assert_eq!(first, second);

    let mut sorted = first.clone();
    sorted.sort();
    let expected: Vec<String> = (0..8).map(|i| format!("{}.wav", i)).collect();
    assert_eq!(sorted, expected);
}

#[test]
fn test_stereo_44k_is_downmixed_and_resampled() {
    let dir = TempAudioDir::new();
    dir.write_tone("stereo.wav", 440.0, 0.5, 44100, 2);

    let records = get_embeddings(&AudioFolder::default(), dir.path(), &config(1)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].embedding.len(), N_MFCC);

    // Keeping both channels still yields one vector of the same length
    let loader = AudioFolder::new(DatasetConfig {
        mono: false,
        ..DatasetConfig::default()
    });
    let records = get_embeddings(&loader, dir.path(), &config(1)).unwrap();
    assert_eq!(records[0].embedding.len(), N_MFCC);
}
