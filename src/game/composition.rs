// Composition mode
// The player holds note buttons to record a short phrase. Held duration
// shapes only the live preview; playback uses a fixed short duration so
// the phrase stays crisp.

use crate::notes::{
    Note, ADDITIONAL_SUSTAIN_MS, COMPOSITION_GAP_MS, COMPOSITION_MAX_NOTES, COMPOSITION_NOTE_MS,
};
use crate::timing::{Cue, CueEvent, HighlightTarget};
use std::collections::HashMap;
use std::time::Duration;

/// One recorded note: which swara and how long it rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposedNote {
    pub note: Note,
    pub sustain_ms: u64,
}

pub struct Composition {
    entries: Vec<ComposedNote>,
    /// Press timestamps of currently held buttons.
    held: HashMap<Note, Duration>,
}

impl Composition {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            held: HashMap::new(),
        }
    }

    /// Register a press at `now`. Returns false if the note was already
    /// held (repeat events from the same hold are ignored).
    pub fn press(&mut self, note: Note, now: Duration) -> bool {
        if self.held.contains_key(&note) {
            return false;
        }
        self.held.insert(note, now);
        true
    }

    /// Register a release at `now`, appending the held note with its
    /// measured sustain plus the fixed decay tail. Returns true when an
    /// entry was recorded; the buffer is hard-capped at
    /// [`COMPOSITION_MAX_NOTES`].
    pub fn release(&mut self, note: Note, now: Duration) -> bool {
        let Some(start) = self.held.remove(&note) else {
            return false;
        };

        if self.entries.len() >= COMPOSITION_MAX_NOTES {
            return false;
        }

        let held_ms = now.saturating_sub(start).as_millis() as u64;
        self.entries.push(ComposedNote {
            note,
            sustain_ms: held_ms + ADDITIONAL_SUSTAIN_MS,
        });
        true
    }

    pub fn entries(&self) -> &[ComposedNote] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= COMPOSITION_MAX_NOTES
    }

    /// Drop the recording and abandon any in-progress holds.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.held.clear();
    }

    /// Replay plan: one note every 500 ms, each with the fixed 200 ms
    /// playback duration, highlighting its chip. Empty recording yields
    /// an empty plan.
    pub fn playback_plan(&self) -> Vec<Cue> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let mut cues = Vec::with_capacity(self.entries.len() * 2 + 1);
        for (i, entry) in self.entries.iter().enumerate() {
            let at = i as u64 * COMPOSITION_GAP_MS;
            cues.push(Cue::new(at, CueEvent::Highlight(HighlightTarget::Chip(i))));
            cues.push(Cue::new(
                at,
                CueEvent::Play {
                    note: entry.note,
                    sustain_ms: COMPOSITION_NOTE_MS,
                },
            ));
        }
        cues.push(Cue::new(
            self.entries.len() as u64 * COMPOSITION_GAP_MS,
            CueEvent::Finished,
        ));
        cues
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{Clock, ManualClock};

    #[test]
    fn test_press_release_records_sustain() {
        let clock = ManualClock::new();
        let mut comp = Composition::new();

        assert!(comp.press(Note::Ma, clock.now()));
        clock.advance_ms(340);
        assert!(comp.release(Note::Ma, clock.now()));

        assert_eq!(comp.len(), 1);
        assert_eq!(comp.entries()[0].note, Note::Ma);
        assert_eq!(comp.entries()[0].sustain_ms, 340 + ADDITIONAL_SUSTAIN_MS);
    }

    #[test]
    fn test_buffer_capped_at_eight() {
        let clock = ManualClock::new();
        let mut comp = Composition::new();

        for _ in 0..9 {
            comp.press(Note::Sa, clock.now());
            clock.advance_ms(100);
            comp.release(Note::Sa, clock.now());
        }

        assert_eq!(comp.len(), COMPOSITION_MAX_NOTES);
        assert!(comp.is_full());

        // The 9th cycle was a complete press/release and still bounced.
        comp.press(Note::Pa, clock.now());
        assert!(!comp.release(Note::Pa, clock.now()));
        assert_eq!(comp.len(), 8);
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let clock = ManualClock::new();
        let mut comp = Composition::new();
        assert!(!comp.release(Note::Ni, clock.now()));
        assert!(comp.is_empty());
    }

    #[test]
    fn test_double_press_ignored_until_release() {
        let clock = ManualClock::new();
        let mut comp = Composition::new();

        assert!(comp.press(Note::Ga, clock.now()));
        clock.advance_ms(50);
        // Duplicate press keeps the original timestamp.
        assert!(!comp.press(Note::Ga, clock.now()));
        clock.advance_ms(50);
        assert!(comp.release(Note::Ga, clock.now()));

        assert_eq!(comp.entries()[0].sustain_ms, 100 + ADDITIONAL_SUSTAIN_MS);
    }

    #[test]
    fn test_clear_resets_entries_and_holds() {
        let clock = ManualClock::new();
        let mut comp = Composition::new();

        comp.press(Note::Sa, clock.now());
        clock.advance_ms(10);
        comp.release(Note::Sa, clock.now());
        comp.press(Note::Pa, clock.now());

        comp.clear();
        assert!(comp.is_empty());

        // The abandoned hold no longer records on release.
        assert!(!comp.release(Note::Pa, clock.now()));
    }

    #[test]
    fn test_playback_plan_spacing_and_fixed_duration() {
        let clock = ManualClock::new();
        let mut comp = Composition::new();
        for note in [Note::Sa, Note::Pa] {
            comp.press(note, clock.now());
            clock.advance_ms(900);
            comp.release(note, clock.now());
        }

        let cues = comp.playback_plan();
        let plays: Vec<(u64, u64)> = cues
            .iter()
            .filter_map(|c| match c.event {
                CueEvent::Play { sustain_ms, .. } => Some((c.at_ms, sustain_ms)),
                _ => None,
            })
            .collect();

        // Recorded sustains do not leak into playback.
        assert_eq!(plays, vec![(0, COMPOSITION_NOTE_MS), (500, COMPOSITION_NOTE_MS)]);
        assert_eq!(cues.last().unwrap().event, CueEvent::Finished);
        assert_eq!(cues.last().unwrap().at_ms, 1000);
    }

    #[test]
    fn test_empty_recording_has_no_plan() {
        assert!(Composition::new().playback_plan().is_empty());
    }
}
