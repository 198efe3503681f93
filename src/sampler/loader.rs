// WAV asset loading
// Every note asset is decoded once into interleaved f32 frames; the audio
// callback only ever touches the decoded data.

use crate::sampler::{SamplerError, SamplerResult};
use hound::{SampleFormat, WavReader};
use std::path::Path;
use std::sync::Arc;

/// A decoded note asset.
#[derive(Debug)]
pub struct Sample {
    pub name: String,
    /// Interleaved frames, normalized to [-1.0, 1.0].
    pub data: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Sample {
    /// Number of frames (per-channel sample count).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.data.len() / self.channels as usize
        }
    }
}

/// Decode one WAV file into a shareable [`Sample`].
pub fn load_sample(path: &Path) -> SamplerResult<Arc<Sample>> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    let data: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 24) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32 / (1 << 23) as f32))
            .collect::<Result<Vec<_>, _>>()?,
        (format, bits) => {
            return Err(SamplerError::UnsupportedEncoding(format!(
                "{format:?} {bits}-bit in {}",
                path.display()
            )));
        }
    };

    if data.is_empty() || spec.channels == 0 {
        return Err(SamplerError::EmptySample(path.display().to_string()));
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Arc::new(Sample {
        name,
        data,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    }))
}
