// Game module - the three training modes and the session that owns them

pub mod composition;
pub mod recognition;
pub mod sour;

pub use composition::{ComposedNote, Composition};
pub use recognition::{Recognition, RecognitionPhase, RoundOutcome};
pub use sour::{SourOutcome, SourRound, REFERENCE_MELODY};

/// Active game mode. Each mode owns its own state; switching never
/// touches another mode's buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Recognition,
    Composition,
    SourNote,
}

/// Session state shared by the UI: the active mode and the running score.
///
/// Switching into Recognition resets the score and the recognition buffers;
/// the other modes keep the running total.
pub struct GameSession {
    mode: Mode,
    score: u32,
    pub recognition: Recognition,
    pub composition: Composition,
    pub sour: Option<SourRound>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            mode: Mode::Recognition,
            score: 0,
            recognition: Recognition::new(),
            composition: Composition::new(),
            sour: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode == Mode::Recognition {
            self.score = 0;
            self.recognition.reset();
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
