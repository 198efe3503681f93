// Sitar Riyaz - library exports for tests

pub mod audio;
pub mod game;
pub mod messaging;
pub mod notes;
pub mod sampler;
pub mod timing;
pub mod ui;

// Re-export commonly used types for convenience
pub use audio::{AtomicF32, AudioEngine, EngineError};
pub use game::{
    ComposedNote, Composition, GameSession, Mode, Recognition, RecognitionPhase, RoundOutcome,
    SourOutcome, SourRound, REFERENCE_MELODY,
};
pub use messaging::{create_command_channel, create_notification_channel, Command, Notification};
pub use notes::{level_config, Level, Note, LEVELS};
pub use sampler::{NoteBank, Sample, SamplerError, SitarVoice};
pub use timing::{Clock, Cue, CueEvent, HighlightTarget, ManualClock, Sequencer, SystemClock};
