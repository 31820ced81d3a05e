//! Output formatting for CLI results

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use colorful::Colorful;
use serde::Serialize;

use crate::core::Device;
use crate::extract::EmbeddingRecord;

/// Coefficients shown per file in terminal output
pub const PREVIEW_COEFFS: usize = 4;

/// Format one record for terminal output
pub fn format_record(record: &EmbeddingRecord, preview: usize) -> String {
    let values = record.embedding.as_slice();
    let shown: Vec<String> = values
        .iter()
        .take(preview)
        .map(|v| format!("{:.3}", v))
        .collect();
    let ellipsis = if values.len() > preview { ", ..." } else { "" };

    format!(
        "{} [{}] {}{}",
        record.path.display().to_string().cyan(),
        values.len(),
        shown.join(", "),
        ellipsis
    )
}

/// Format a summary for the whole run
pub fn format_summary(count: usize, elapsed: Duration) -> String {
    format!(
        "\n{} embedding(s) computed in {:.1}s",
        count,
        elapsed.as_secs_f64()
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    device: String,
    count: usize,
    embeddings: &'a [EmbeddingRecord],
}

/// Format records as a JSON report
pub fn format_json(records: &[EmbeddingRecord], device: Device) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        device: device.to_string(),
        count: records.len(),
        embeddings: records,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
