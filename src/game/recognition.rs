// Pattern recognition mode
// The app plays a random pattern; the player repeats it on the sitar
// string. Levels above 1 are auditory only: the note buttons stay dark
// and disabled while the pattern plays.

use crate::notes::{
    level_config, Note, ADDITIONAL_SUSTAIN_MS, PATTERN_LEAD_IN_MS, PATTERN_PLAYBACK_INTERVAL_MS,
    SUCCESS_STAGGER_MS,
};
use crate::timing::{Cue, CueEvent, HighlightTarget};
use rand::Rng;

/// Where a recognition round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionPhase {
    /// No pattern in flight.
    Idle,
    /// The pattern playback sequence is running.
    Playing,
    /// Waiting for the player to repeat the pattern.
    AwaitingInput,
}

/// Result of checking a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub correct: bool,
    pub points: u32,
    pub feedback: String,
}

pub struct Recognition {
    level: u8,
    pattern: Vec<Note>,
    answer: Vec<Note>,
    phase: RecognitionPhase,
}

impl Recognition {
    pub fn new() -> Self {
        Self {
            level: 1,
            pattern: Vec::new(),
            answer: Vec::new(),
            phase: RecognitionPhase::Idle,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Change difficulty. Clears both buffers so a stale pattern can never
    /// be checked against a new level.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.clamp(1, 3);
        self.reset();
    }

    /// Drop the pattern and answer and return to idle.
    pub fn reset(&mut self) {
        self.pattern.clear();
        self.answer.clear();
        self.phase = RecognitionPhase::Idle;
    }

    pub fn phase(&self) -> RecognitionPhase {
        self.phase
    }

    /// Note buttons are locked during playback on auditory levels.
    pub fn notes_locked(&self) -> bool {
        self.phase == RecognitionPhase::Playing && self.level > 1
    }

    /// Sample a fresh pattern for the current level and return its
    /// playback plan. Draws are independent and uniform, duplicates
    /// allowed.
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Cue> {
        let config = level_config(self.level);
        self.answer.clear();
        self.pattern = (0..config.pattern_length)
            .map(|_| Note::ALL[rng.gen_range(0..Note::ALL.len())])
            .collect();
        self.phase = RecognitionPhase::Playing;
        self.playback_plan()
    }

    fn playback_plan(&self) -> Vec<Cue> {
        let mut cues = Vec::with_capacity(self.pattern.len() * 2 + 1);
        for (i, note) in self.pattern.iter().enumerate() {
            let at = PATTERN_LEAD_IN_MS + i as u64 * PATTERN_PLAYBACK_INTERVAL_MS;
            // Level 1 shows which button is sounding.
            if self.level == 1 {
                cues.push(Cue::new(
                    at,
                    CueEvent::Highlight(HighlightTarget::NoteButton(*note)),
                ));
            }
            cues.push(Cue::new(
                at,
                CueEvent::Play {
                    note: *note,
                    sustain_ms: ADDITIONAL_SUSTAIN_MS,
                },
            ));
        }
        cues.push(Cue::new(
            PATTERN_LEAD_IN_MS + self.pattern.len() as u64 * PATTERN_PLAYBACK_INTERVAL_MS,
            CueEvent::Finished,
        ));
        cues
    }

    /// Called when the playback sequence finishes.
    pub fn playback_finished(&mut self) {
        if self.phase == RecognitionPhase::Playing {
            self.phase = RecognitionPhase::AwaitingInput;
        }
    }

    /// Append a note to the answer while it is still shorter than the
    /// pattern. Returns true when the note was accepted; extra presses
    /// are ignored.
    pub fn record_answer(&mut self, note: Note) -> bool {
        if self.answer.len() < self.pattern.len() {
            self.answer.push(note);
            true
        } else {
            false
        }
    }

    pub fn answer_len(&self) -> usize {
        self.answer.len()
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    pub fn pattern(&self) -> &[Note] {
        &self.pattern
    }

    /// Submission is possible exactly when the answer is complete.
    pub fn can_submit(&self) -> bool {
        !self.pattern.is_empty() && self.answer.len() == self.pattern.len()
    }

    /// Compare the answer to the pattern element-wise. Returns `None` if
    /// the answer is incomplete. The answer buffer is cleared either way.
    pub fn check_answer(&mut self) -> Option<RoundOutcome> {
        if !self.can_submit() {
            return None;
        }

        let correct = self.answer == self.pattern;
        let outcome = if correct {
            let points = level_config(self.level).points;
            RoundOutcome {
                correct: true,
                points,
                feedback: format!("Correct! +{points} points"),
            }
        } else {
            let labels: Vec<&str> = self.pattern.iter().map(|n| n.label()).collect();
            RoundOutcome {
                correct: false,
                points: 0,
                feedback: format!("Incorrect. The correct pattern was: {}", labels.join(", ")),
            }
        };

        self.answer.clear();
        self.phase = RecognitionPhase::Idle;
        Some(outcome)
    }
}

impl Default for Recognition {
    fn default() -> Self {
        Self::new()
    }
}

/// Plan for the brief staggered flash across the whole string after a
/// correct answer.
pub fn success_animation_plan() -> Vec<Cue> {
    let mut cues: Vec<Cue> = Note::ALL
        .iter()
        .enumerate()
        .map(|(i, note)| {
            Cue::new(
                i as u64 * SUCCESS_STAGGER_MS,
                CueEvent::Highlight(HighlightTarget::NoteButton(*note)),
            )
        })
        .collect();
    cues.push(Cue::new(
        Note::ALL.len() as u64 * SUCCESS_STAGGER_MS,
        CueEvent::Finished,
    ));
    cues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::LEVELS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn force_pattern(game: &mut Recognition, pattern: &[Note]) {
        game.pattern = pattern.to_vec();
        game.answer.clear();
        game.phase = RecognitionPhase::AwaitingInput;
    }

    #[test]
    fn test_pattern_length_matches_level() {
        let mut rng = StdRng::seed_from_u64(7);
        for (i, level) in LEVELS.iter().enumerate() {
            let mut game = Recognition::new();
            game.set_level(i as u8 + 1);
            game.start_round(&mut rng);
            assert_eq!(game.pattern_len(), level.pattern_length);
            assert!(game.pattern().iter().all(|n| Note::ALL.contains(n)));
        }
    }

    #[test]
    fn test_submit_enabled_iff_answer_complete() {
        let mut game = Recognition::new();
        force_pattern(&mut game, &[Note::Sa, Note::Pa, Note::Ni]);

        assert!(!game.can_submit());
        game.record_answer(Note::Sa);
        game.record_answer(Note::Pa);
        assert!(!game.can_submit());
        game.record_answer(Note::Ni);
        assert!(game.can_submit());

        // Extra presses past the pattern length are ignored.
        game.record_answer(Note::Ga);
        assert_eq!(game.answer_len(), 3);
    }

    #[test]
    fn test_correct_answer_scores_level_points() {
        let mut game = Recognition::new();
        force_pattern(&mut game, &[Note::Sa, Note::Pa, Note::Ni]);
        game.record_answer(Note::Sa);
        game.record_answer(Note::Pa);
        game.record_answer(Note::Ni);

        let outcome = game.check_answer().unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points, 10);
        assert_eq!(outcome.feedback, "Correct! +10 points");

        // Buffer cleared after the check.
        assert_eq!(game.answer_len(), 0);
        assert!(!game.can_submit());
    }

    #[test]
    fn test_incorrect_answer_reveals_pattern() {
        let mut game = Recognition::new();
        force_pattern(&mut game, &[Note::Sa, Note::Pa, Note::Ni]);
        game.record_answer(Note::Sa);
        game.record_answer(Note::Pa);
        game.record_answer(Note::Dha);

        let outcome = game.check_answer().unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.points, 0);
        assert_eq!(outcome.feedback, "Incorrect. The correct pattern was: ச, பா, நி");
        assert_eq!(game.answer_len(), 0);
    }

    #[test]
    fn test_incomplete_answer_cannot_be_checked() {
        let mut game = Recognition::new();
        force_pattern(&mut game, &[Note::Sa, Note::Pa]);
        game.record_answer(Note::Sa);
        assert!(game.check_answer().is_none());
        // Partial answer is preserved when the check is refused.
        assert_eq!(game.answer_len(), 1);
    }

    #[test]
    fn test_playback_plan_spacing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Recognition::new();
        let cues = game.start_round(&mut rng);

        let plays: Vec<u64> = cues
            .iter()
            .filter(|c| matches!(c.event, CueEvent::Play { .. }))
            .map(|c| c.at_ms)
            .collect();
        assert_eq!(plays, vec![500, 1300, 2100]);

        // Level 1 highlights every note as it plays.
        let highlights = cues
            .iter()
            .filter(|c| matches!(c.event, CueEvent::Highlight(_)))
            .count();
        assert_eq!(highlights, 3);

        assert_eq!(cues.last().unwrap().event, CueEvent::Finished);
        assert_eq!(cues.last().unwrap().at_ms, 2900);
    }

    #[test]
    fn test_auditory_levels_have_no_highlights_and_lock_notes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Recognition::new();
        game.set_level(3);
        let cues = game.start_round(&mut rng);

        assert!(
            !cues
                .iter()
                .any(|c| matches!(c.event, CueEvent::Highlight(_)))
        );
        assert!(game.notes_locked());

        game.playback_finished();
        assert!(!game.notes_locked());
        assert_eq!(game.phase(), RecognitionPhase::AwaitingInput);
    }

    #[test]
    fn test_level_change_clears_round() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Recognition::new();
        game.start_round(&mut rng);
        game.playback_finished();
        game.record_answer(Note::Sa);

        game.set_level(2);
        assert_eq!(game.pattern_len(), 0);
        assert_eq!(game.answer_len(), 0);
        assert!(!game.can_submit());
    }

    #[test]
    fn test_success_animation_staggers_all_buttons() {
        let cues = success_animation_plan();
        assert_eq!(cues.len(), 13);
        assert_eq!(cues[0].at_ms, 0);
        assert_eq!(cues[11].at_ms, 550);
        assert_eq!(cues[12].event, CueEvent::Finished);
    }
}
