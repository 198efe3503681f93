// Sequencer - delivers timed cues to the UI loop
// A sequence is a fixed list of cues at millisecond offsets from its start.
// The UI polls once per frame; every cue is delivered exactly once, in
// order. There is no cancellation: a started sequence runs to completion.

use crate::notes::Note;
use std::time::Duration;

/// What a highlight cue should flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightTarget {
    /// A note button on the sitar string.
    NoteButton(Note),
    /// A recorded-note chip in the composition row.
    Chip(usize),
}

/// One timed event inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueEvent {
    /// Trigger a note with a fade-out sustain.
    Play { note: Note, sustain_ms: u64 },
    /// Flash a control.
    Highlight(HighlightTarget),
    /// The sequence is over; controls may be re-enabled.
    Finished,
}

/// A cue scheduled `at_ms` after the sequence starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub at_ms: u64,
    pub event: CueEvent,
}

impl Cue {
    pub fn new(at_ms: u64, event: CueEvent) -> Self {
        Self { at_ms, event }
    }
}

/// Executes a cue list against a clock.
///
/// Playback timing is decoupled from audio completion: cues fire on the
/// fixed schedule regardless of how long the triggered samples ring.
pub struct Sequencer {
    cues: Vec<Cue>,
    next: usize,
    started_at: Duration,
}

impl Sequencer {
    /// Start a sequence at `now`. Cues are sorted by offset; ties keep
    /// their build order.
    pub fn start(mut cues: Vec<Cue>, now: Duration) -> Self {
        cues.sort_by_key(|c| c.at_ms);
        Self {
            cues,
            next: 0,
            started_at: now,
        }
    }

    /// Return every cue due at or before `now` that has not fired yet.
    pub fn poll(&mut self, now: Duration) -> Vec<CueEvent> {
        let elapsed_ms = now.saturating_sub(self.started_at).as_millis() as u64;

        let mut due = Vec::new();
        while self.next < self.cues.len() && self.cues[self.next].at_ms <= elapsed_ms {
            due.push(self.cues[self.next].event);
            self.next += 1;
        }
        due
    }

    /// True once every cue has been delivered.
    pub fn is_finished(&self) -> bool {
        self.next >= self.cues.len()
    }
}
