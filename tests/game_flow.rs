// End-to-end game flows driven through the public API with a manual clock,
// so no test waits on the wall clock.

use sitar_riyaz::game::recognition::success_animation_plan;
use sitar_riyaz::notes::{ADDITIONAL_SUSTAIN_MS, COMPOSITION_MAX_NOTES};
use sitar_riyaz::{
    Clock, CueEvent, GameSession, ManualClock, Mode, Note, Sequencer, SourRound,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run a cue plan to completion on a manual clock, collecting the notes
/// in the order they were triggered.
fn drive_to_completion(cues: Vec<sitar_riyaz::Cue>, clock: &ManualClock) -> Vec<Note> {
    let mut seq = Sequencer::start(cues, clock.now());
    let mut played = Vec::new();

    while !seq.is_finished() {
        clock.advance_ms(100);
        for event in seq.poll(clock.now()) {
            if let CueEvent::Play { note, .. } = event {
                played.push(note);
            }
        }
    }
    played
}

#[test]
fn test_recognition_round_correct_answer() {
    let clock = ManualClock::new();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut session = GameSession::new();

    let plan = session.recognition.start_round(&mut rng);
    let played = drive_to_completion(plan, &clock);
    session.recognition.playback_finished();

    // Level 1: three notes, heard in generation order.
    assert_eq!(played.len(), 3);
    assert_eq!(played, session.recognition.pattern().to_vec());

    // Echo the pattern back.
    for note in played {
        assert!(session.recognition.record_answer(note));
    }
    assert!(session.recognition.can_submit());

    let outcome = session.recognition.check_answer().unwrap();
    session.add_points(outcome.points);

    assert!(outcome.correct);
    assert_eq!(outcome.feedback, "Correct! +10 points");
    assert_eq!(session.score(), 10);
}

#[test]
fn test_recognition_round_wrong_answer_keeps_score() {
    let clock = ManualClock::new();
    let mut rng = StdRng::seed_from_u64(7);
    let mut session = GameSession::new();

    let plan = session.recognition.start_round(&mut rng);
    let pattern = drive_to_completion(plan, &clock);
    session.recognition.playback_finished();

    // Answer with every note shifted one step up the string.
    for note in &pattern {
        let wrong = Note::ALL[(note.index() + 1) % Note::ALL.len()];
        session.recognition.record_answer(wrong);
    }

    let outcome = session.recognition.check_answer().unwrap();
    session.add_points(outcome.points);

    assert!(!outcome.correct);
    assert!(outcome.feedback.starts_with("Incorrect. The correct pattern was: "));
    assert_eq!(session.score(), 0);
}

#[test]
fn test_composition_record_and_replay() {
    let clock = ManualClock::new();
    let mut session = GameSession::new();
    session.switch_mode(Mode::Composition);

    // Record well past the cap.
    for i in 0..COMPOSITION_MAX_NOTES + 4 {
        let note = Note::ALL[i % Note::ALL.len()];
        session.composition.press(note, clock.now());
        clock.advance_ms(250);
        session.composition.release(note, clock.now());
    }
    assert_eq!(session.composition.len(), COMPOSITION_MAX_NOTES);
    assert!(
        session
            .composition
            .entries()
            .iter()
            .all(|e| e.sustain_ms == 250 + ADDITIONAL_SUSTAIN_MS)
    );

    let replayed = drive_to_completion(session.composition.playback_plan(), &clock);
    let recorded: Vec<Note> = session.composition.entries().iter().map(|e| e.note).collect();
    assert_eq!(replayed, recorded);

    session.composition.clear();
    assert!(session.composition.playback_plan().is_empty());
}

#[test]
fn test_sour_round_full_flow() {
    let clock = ManualClock::new();
    let mut rng = StdRng::seed_from_u64(99);
    let mut session = GameSession::new();
    session.switch_mode(Mode::SourNote);

    let round = SourRound::generate(&mut rng);
    let key = round.sour_index();
    let melody = round.melody().to_vec();
    session.sour = Some(round);

    let heard = drive_to_completion(
        session.sour.as_ref().unwrap().playback_plan(),
        &clock,
    );
    assert_eq!(heard, melody);

    let round = session.sour.as_mut().unwrap();
    round.select(key);
    let outcome = round.submit().unwrap();
    session.add_points(outcome.points);

    assert!(outcome.correct);
    assert_eq!(outcome.feedback, "Correct! You found the sour note!");
    assert_eq!(session.score(), 20);

    // Round is spent until a new one starts.
    assert!(!session.sour.as_ref().unwrap().can_submit());
}

#[test]
fn test_success_animation_covers_the_string() {
    let clock = ManualClock::new();
    let mut seq = Sequencer::start(success_animation_plan(), clock.now());

    let mut flashed = Vec::new();
    while !seq.is_finished() {
        clock.advance_ms(50);
        for event in seq.poll(clock.now()) {
            if let CueEvent::Highlight(target) = event {
                flashed.push(target);
            }
        }
    }
    assert_eq!(flashed.len(), Note::ALL.len());
}

#[test]
fn test_score_survives_mode_switches_except_recognition() {
    let mut session = GameSession::new();
    session.add_points(40);

    session.switch_mode(Mode::SourNote);
    session.switch_mode(Mode::Composition);
    assert_eq!(session.score(), 40);

    session.switch_mode(Mode::Recognition);
    assert_eq!(session.score(), 0);
}
