// Sampler module - sitar note assets and their playback voices

pub mod bank;
pub mod loader;
pub mod voice;

pub use bank::NoteBank;
pub use loader::{Sample, load_sample};
pub use voice::SitarVoice;

use thiserror::Error;

/// Sampler-related errors
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV decode error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Unsupported WAV encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Sample file has no audio data: {0}")]
    EmptySample(String),
}

pub type SamplerResult<T> = Result<T, SamplerError>;
