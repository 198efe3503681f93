// Audio module - cpal output stream and real-time voice mixing

pub mod engine;
pub mod parameters;
pub mod voices;

pub use engine::{AudioEngine, EngineError};
pub use parameters::AtomicF32;
pub use voices::VoicePool;
