// Timing module - Clock abstraction and cue-list sequencing
// All game playback runs on fixed delays polled from the UI frame loop.

pub mod clock;
pub mod sequencer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use sequencer::{Cue, CueEvent, HighlightTarget, Sequencer};
