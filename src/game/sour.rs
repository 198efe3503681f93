// Sour note mode
// A fixed reference melody plays with exactly one note swapped for a
// swara that never appears in the reference. The player points at the
// position that sounded wrong.

use crate::notes::{Note, ADDITIONAL_SUSTAIN_MS, PATTERN_PLAYBACK_INTERVAL_MS, SOUR_NOTE_POINTS};
use crate::timing::{Cue, CueEvent, HighlightTarget};
use rand::Rng;

/// The 7-note reference melody (Twinkle Twinkle on the string).
pub const REFERENCE_MELODY: [Note; 7] = [
    Note::Sa,
    Note::Sa,
    Note::Pa,
    Note::Pa,
    Note::Dha2,
    Note::Dha2,
    Note::Pa,
];

/// Result of a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourOutcome {
    pub correct: bool,
    pub points: u32,
    pub feedback: String,
    /// Position that actually held the sour note.
    pub sour_index: usize,
    /// Position the player picked.
    pub guessed_index: usize,
}

/// One round: the doctored melody, its answer key, and the player's
/// current selection. A round accepts exactly one submission.
pub struct SourRound {
    melody: [Note; 7],
    sour_index: usize,
    selected: Option<usize>,
    open: bool,
}

impl SourRound {
    /// Build a round: substitution index uniform over the melody, the
    /// replacement uniform over the swaras absent from the reference.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut melody = REFERENCE_MELODY;
        let sour_index = rng.gen_range(0..melody.len());

        let foreign: Vec<Note> = Note::ALL
            .iter()
            .copied()
            .filter(|n| !REFERENCE_MELODY.contains(n))
            .collect();
        melody[sour_index] = foreign[rng.gen_range(0..foreign.len())];

        Self {
            melody,
            sour_index,
            selected: None,
            open: true,
        }
    }

    pub fn melody(&self) -> &[Note] {
        &self.melody
    }

    /// Position of the sour note; the UI colors it after a correct guess.
    pub fn sour_index(&self) -> usize {
        self.sour_index
    }

    /// Playback plan: 800 ms spacing, highlighting each sounding button.
    pub fn playback_plan(&self) -> Vec<Cue> {
        let mut cues = Vec::with_capacity(self.melody.len() * 2 + 1);
        for (i, note) in self.melody.iter().enumerate() {
            let at = i as u64 * PATTERN_PLAYBACK_INTERVAL_MS;
            cues.push(Cue::new(
                at,
                CueEvent::Highlight(HighlightTarget::NoteButton(*note)),
            ));
            cues.push(Cue::new(
                at,
                CueEvent::Play {
                    note: *note,
                    sustain_ms: ADDITIONAL_SUSTAIN_MS,
                },
            ));
        }
        cues.push(Cue::new(
            self.melody.len() as u64 * PATTERN_PLAYBACK_INTERVAL_MS,
            CueEvent::Finished,
        ));
        cues
    }

    /// Pick a position. Only one selection is live at a time; re-selecting
    /// moves the mark. Ignored once the round is resolved.
    pub fn select(&mut self, index: usize) {
        if self.open && index < self.melody.len() {
            self.selected = Some(index);
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Submission needs a live selection on an unresolved round.
    pub fn can_submit(&self) -> bool {
        self.open && self.selected.is_some()
    }

    /// Resolve the round against the answer key. Returns `None` without a
    /// selection or after the round is already resolved.
    pub fn submit(&mut self) -> Option<SourOutcome> {
        if !self.can_submit() {
            return None;
        }
        let guessed_index = self.selected?;
        self.open = false;

        let correct = guessed_index == self.sour_index;
        Some(if correct {
            SourOutcome {
                correct: true,
                points: SOUR_NOTE_POINTS,
                feedback: "Correct! You found the sour note!".to_string(),
                sour_index: self.sour_index,
                guessed_index,
            }
        } else {
            SourOutcome {
                correct: false,
                points: 0,
                feedback: "Incorrect! Try again.".to_string(),
                sour_index: self.sour_index,
                guessed_index,
            }
        })
    }
}
