// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

use std::time::Instant;

use colorful::Colorful;

use crate::dataset::AudioFolder;
use crate::extract::get_embeddings;

pub use args::Args;
pub use output::{format_json, format_record, format_summary, PREVIEW_COEFFS};

/// Run the CLI
pub fn run(args: &Args) -> anyhow::Result<()> {
    let loader = AudioFolder::new(args.dataset_config());
    let config = args.extract_config();

    let started = Instant::now();
    let records = get_embeddings(&loader, &args.input, &config)?;

    if args.json {
        println!("{}", format_json(&records, config.device)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No audio files found!".red());
        return Ok(());
    }

    for record in &records {
        println!("{}", format_record(record, PREVIEW_COEFFS));
    }
    println!("{}", format_summary(records.len(), started.elapsed()));

    Ok(())
}
