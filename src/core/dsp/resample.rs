//! Whole-buffer sample rate conversion

use anyhow::{Context, Result};
use rubato::{FftFixedIn, Resampler};

const CHUNK_SIZE: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Resample every channel from `from_rate` to `to_rate`.
///
/// Output length is `ceil(len * to_rate / from_rate)`; the resampler's
/// group delay is trimmed from the front.
pub fn resample(channels: &[Vec<f32>], from_rate: u32, to_rate: u32) -> Result<Vec<Vec<f32>>> {
    if from_rate == to_rate || channels.is_empty() {
        return Ok(channels.to_vec());
    }

    let len = channels[0].len();
    let expected = (len as u64 * to_rate as u64).div_ceil(from_rate as u64) as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        channels.len(),
    )
    .with_context(|| format!("Failed to build resampler {} Hz -> {} Hz", from_rate, to_rate))?;

    let delay = resampler.output_delay();
    let mut output: Vec<Vec<f32>> = vec![Vec::with_capacity(expected + delay); channels.len()];

    let mut pos = 0;
    while pos + resampler.input_frames_next() <= len {
        let n = resampler.input_frames_next();
        let chunk: Vec<&[f32]> = channels.iter().map(|c| &c[pos..pos + n]).collect();
        append(&mut output, resampler.process(chunk.as_slice(), None)?);
        pos += n;
    }

    if pos < len {
        let tail: Vec<&[f32]> = channels.iter().map(|c| &c[pos..]).collect();
        append(&mut output, resampler.process_partial(Some(tail.as_slice()), None)?);
    }

    // Flush until the delayed signal is fully out
    while output[0].len() < expected + delay {
        let flush: Option<&[Vec<f32>]> = None;
        let produced = resampler.process_partial(flush, None)?;
        if produced[0].is_empty() {
            break;
        }
        append(&mut output, produced);
    }

    for channel in output.iter_mut() {
        channel.drain(..delay.min(channel.len()));
        channel.truncate(expected);
    }

    Ok(output)
}

fn append(output: &mut [Vec<f32>], produced: Vec<Vec<f32>>) {
    for (out, chunk) in output.iter_mut().zip(produced) {
        out.extend_from_slice(&chunk);
    }
}
