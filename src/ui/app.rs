// Main app UI
// One egui window: the sitar string across the middle, the active mode's
// panel below it. Playback sequences are polled once per frame; while one
// runs, the control that started it stays disabled, so only a single
// sequence can ever be in flight.

use crate::audio::parameters::AtomicF32;
use crate::audio::AudioEngine;
use crate::game::recognition::success_animation_plan;
use crate::game::{GameSession, Mode};
use crate::messaging::channels::{CommandProducer, NotificationConsumer};
use crate::messaging::command::Command;
use crate::messaging::notification::{Notification, NotificationCategory, NotificationLevel};
use crate::notes::{Note, ADDITIONAL_SUSTAIN_MS, COMPOSITION_MAX_NOTES, HIGHLIGHT_MS};
use crate::sampler::NoteBank;
use crate::timing::{Clock, Cue, CueEvent, HighlightTarget, Sequencer, SystemClock};
use eframe::egui;
use ringbuf::traits::{Consumer, Producer};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

const AMBER: egui::Color32 = egui::Color32::from_rgb(253, 230, 138);
const AMBER_BRIGHT: egui::Color32 = egui::Color32::from_rgb(251, 191, 36);
const GREEN: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const RED: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

/// Which playback sequence is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceKind {
    Pattern,
    Composition,
    SourMelody,
    SuccessFlash,
}

struct RunningSequence {
    sequencer: Sequencer,
    kind: SequenceKind,
}

/// Feedback line with a display tone.
#[derive(Clone)]
struct Feedback {
    text: String,
    tone: Tone,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone {
    Neutral,
    Good,
    Bad,
}

impl Feedback {
    fn neutral(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tone: Tone::Neutral,
        }
    }

    fn color(&self) -> egui::Color32 {
        match self.tone {
            Tone::Neutral => egui::Color32::GRAY,
            Tone::Good => GREEN,
            Tone::Bad => RED,
        }
    }
}

pub struct RiyazApp {
    command_tx: CommandProducer,
    notification_rx: NotificationConsumer,
    volume_atomic: AtomicF32,
    volume_ui: f32,
    bank: NoteBank,
    session: GameSession,
    clock: SystemClock,
    rng: rand::rngs::ThreadRng,

    sequence: Option<RunningSequence>,
    /// Active control flashes with their expiry times.
    highlights: Vec<(HighlightTarget, Duration)>,
    /// Note buttons currently held down (for composition recording).
    held_notes: HashSet<Note>,

    feedback: Feedback,
    sour_feedback: Feedback,
    /// After a sour submission: (position to color, was the guess right).
    sour_mark: Option<(usize, bool)>,
    /// Position buttons appear only after the melody finishes.
    sour_positions_ready: bool,

    notification_queue: VecDeque<Notification>,
    /// Notes whose asset failure was already surfaced in the status bar.
    failed_notes: HashSet<Note>,

    // Keeps the cpal stream alive for the lifetime of the window.
    _engine: Option<AudioEngine>,
}

impl RiyazApp {
    pub fn new(
        command_tx: CommandProducer,
        notification_rx: NotificationConsumer,
        volume_atomic: AtomicF32,
        bank: NoteBank,
        engine: Option<AudioEngine>,
    ) -> Self {
        let initial_volume = volume_atomic.get();

        Self {
            command_tx,
            notification_rx,
            volume_atomic,
            volume_ui: initial_volume,
            bank,
            session: GameSession::new(),
            clock: SystemClock::new(),
            rng: rand::thread_rng(),
            sequence: None,
            highlights: Vec::new(),
            held_notes: HashSet::new(),
            feedback: Feedback::neutral("Select a level and click Play Pattern."),
            sour_feedback: Feedback::neutral("Click Start Round to hear the melody."),
            sour_mark: None,
            sour_positions_ready: false,
            notification_queue: VecDeque::new(),
            failed_notes: HashSet::new(),
            _engine: engine,
        }
    }

    /// Resolve the note's sample and hand it to the audio callback. The
    /// fade spans the requested duration plus the fixed decay tail.
    /// A missing or corrupt asset degrades to silence.
    fn play_note(&mut self, note: Note, sustain_ms: Option<u64>) {
        match self.bank.get(note) {
            Ok(sample) => {
                let _ = self.command_tx.try_push(Command::PlaySample {
                    sample,
                    ramp_ms: sustain_ms.map(|s| s + ADDITIONAL_SUSTAIN_MS),
                });
            }
            Err(e) => {
                if self.failed_notes.insert(note) {
                    self.push_notification(Notification::error(
                        NotificationCategory::Assets,
                        format!("Note {} unavailable: {e}", note.label()),
                    ));
                }
            }
        }
    }

    fn push_notification(&mut self, notification: Notification) {
        self.notification_queue.push_back(notification);
        if self.notification_queue.len() > 10 {
            self.notification_queue.pop_front();
        }
    }

    fn drain_notifications(&mut self) {
        while let Some(notification) = self.notification_rx.try_pop() {
            self.push_notification(notification);
        }
    }

    fn start_sequence(&mut self, cues: Vec<Cue>, kind: SequenceKind) {
        if cues.is_empty() {
            return;
        }
        self.sequence = Some(RunningSequence {
            sequencer: Sequencer::start(cues, self.clock.now()),
            kind,
        });
    }

    fn sequence_running(&self) -> bool {
        self.sequence.is_some()
    }

    /// Deliver due cues and finish the sequence if it ran out.
    fn tick_sequence(&mut self) {
        let now = self.clock.now();

        let mut finished = None;
        let events = match self.sequence.as_mut() {
            Some(run) => {
                let events = run.sequencer.poll(now);
                if run.sequencer.is_finished() {
                    finished = Some(run.kind);
                }
                events
            }
            None => Vec::new(),
        };

        for event in events {
            match event {
                CueEvent::Play { note, sustain_ms } => self.play_note(note, Some(sustain_ms)),
                CueEvent::Highlight(target) => self.add_highlight(target),
                CueEvent::Finished => {}
            }
        }

        if let Some(kind) = finished {
            self.sequence = None;
            self.on_sequence_finished(kind);
        }

        self.highlights.retain(|(_, until)| *until > now);
    }

    fn on_sequence_finished(&mut self, kind: SequenceKind) {
        match kind {
            SequenceKind::Pattern => {
                self.session.recognition.playback_finished();
                self.feedback = Feedback::neutral("Now repeat the pattern!");
            }
            SequenceKind::SourMelody => {
                self.sour_positions_ready = true;
                self.sour_feedback = Feedback::neutral("Select the sour note!");
            }
            SequenceKind::Composition | SequenceKind::SuccessFlash => {}
        }
    }

    fn add_highlight(&mut self, target: HighlightTarget) {
        let until = self.clock.now() + Duration::from_millis(HIGHLIGHT_MS);
        self.highlights.retain(|(t, _)| *t != target);
        self.highlights.push((target, until));
    }

    fn is_highlighted(&self, target: HighlightTarget) -> bool {
        self.highlights.iter().any(|(t, _)| *t == target)
    }

    fn on_note_pressed(&mut self, note: Note) {
        self.play_note(note, Some(ADDITIONAL_SUSTAIN_MS));
        self.add_highlight(HighlightTarget::NoteButton(note));

        match self.session.mode() {
            Mode::Recognition => {
                if self.session.recognition.record_answer(note) {
                    self.feedback = Feedback::neutral(&format!(
                        "Notes recorded: {} / {}",
                        self.session.recognition.answer_len(),
                        self.session.recognition.pattern_len()
                    ));
                }
            }
            Mode::Composition => {
                let now = self.clock.now();
                self.session.composition.press(note, now);
            }
            Mode::SourNote => {}
        }
    }

    fn on_note_released(&mut self, note: Note) {
        // Routed regardless of mode so a hold started in composition mode
        // still resolves after a tab switch.
        let now = self.clock.now();
        self.session.composition.release(note, now);
    }

    fn draw_mode_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (mode, label) in [
                (Mode::Recognition, "Pattern Recognition"),
                (Mode::Composition, "Composition"),
                (Mode::SourNote, "Sour Note"),
            ] {
                let selected = self.session.mode() == mode;
                if ui.selectable_label(selected, label).clicked() && !selected {
                    self.session.switch_mode(mode);
                    if mode == Mode::Recognition {
                        self.feedback =
                            Feedback::neutral("Select a level and click Play Pattern.");
                    }
                }
            }
        });
    }

    fn draw_sitar_string(&mut self, ui: &mut egui::Ui) {
        // Auditory levels hide which button sounds, so the whole string is
        // locked during playback; the sour melody locks it too.
        let locked = self.session.recognition.notes_locked()
            || self
                .sequence
                .as_ref()
                .is_some_and(|run| run.kind == SequenceKind::SourMelody);

        let mut pressed = Vec::new();
        let mut released = Vec::new();

        ui.horizontal(|ui| {
            for note in Note::ALL {
                let lit = self.is_highlighted(HighlightTarget::NoteButton(note))
                    || self.held_notes.contains(&note);
                let fill = if lit { AMBER_BRIGHT } else { AMBER };

                let button = egui::Button::new(
                    egui::RichText::new(note.label())
                        .size(16.0)
                        .strong()
                        .color(egui::Color32::BLACK),
                )
                .fill(fill)
                .stroke(egui::Stroke::new(2.0, egui::Color32::from_rgb(180, 83, 9)))
                .min_size(egui::vec2(52.0, 130.0))
                .sense(egui::Sense::drag());

                let response = ui.add_enabled(!locked, button);
                let down = response.is_pointer_button_down_on();
                let was_down = self.held_notes.contains(&note);

                if down && !was_down {
                    self.held_notes.insert(note);
                    pressed.push(note);
                } else if !down && was_down {
                    self.held_notes.remove(&note);
                    released.push(note);
                }
            }
        });

        for note in pressed {
            self.on_note_pressed(note);
        }
        for note in released {
            self.on_note_released(note);
        }
    }

    fn draw_recognition_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Level:");
            let mut level = self.session.recognition.level();
            let previous = level;
            egui::ComboBox::from_id_salt("level_selector")
                .selected_text(format!("Level {level}"))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut level, 1, "Level 1 (3 notes, guided)");
                    ui.selectable_value(&mut level, 2, "Level 2 (3 notes, by ear)");
                    ui.selectable_value(&mut level, 3, "Level 3 (5 notes, by ear)");
                });
            if level != previous {
                self.session.recognition.set_level(level);
                self.feedback = Feedback::neutral("");
            }

            let play = ui.add_enabled(
                !self.sequence_running(),
                egui::Button::new("Play Pattern"),
            );
            if play.clicked() {
                let plan = self.session.recognition.start_round(&mut self.rng);
                self.start_sequence(plan, SequenceKind::Pattern);
                self.feedback = Feedback::neutral("Listen to the pattern...");
            }

            let can_submit =
                self.session.recognition.can_submit() && !self.sequence_running();
            if ui
                .add_enabled(can_submit, egui::Button::new("Submit Answer"))
                .clicked()
            {
                if let Some(outcome) = self.session.recognition.check_answer() {
                    self.session.add_points(outcome.points);
                    self.feedback = Feedback {
                        text: outcome.feedback,
                        tone: if outcome.correct { Tone::Good } else { Tone::Bad },
                    };
                    if outcome.correct {
                        self.start_sequence(
                            success_animation_plan(),
                            SequenceKind::SuccessFlash,
                        );
                    }
                }
            }
        });

        ui.add_space(6.0);
        ui.colored_label(self.feedback.color(), &self.feedback.text);
        ui.label(format!("Score: {}", self.session.score()));
    }

    fn draw_composition_panel(&mut self, ui: &mut egui::Ui) {
        ui.label("Hold a note to record it; longer holds ring longer in the preview.");
        ui.add_space(4.0);

        ui.horizontal_wrapped(|ui| {
            if self.session.composition.is_empty() {
                ui.weak("No notes recorded yet.");
            }
            for (i, entry) in self.session.composition.entries().iter().enumerate() {
                let lit = self.is_highlighted(HighlightTarget::Chip(i));
                let fill = if lit { AMBER_BRIGHT } else { AMBER };
                // Chips are display only.
                let chip = egui::Button::new(
                    egui::RichText::new(entry.note.label()).color(egui::Color32::BLACK),
                )
                .fill(fill)
                .rounding(egui::Rounding::same(12.0))
                .sense(egui::Sense::hover());
                ui.add(chip);
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let playable = !self.session.composition.is_empty() && !self.sequence_running();
            if ui
                .add_enabled(playable, egui::Button::new("Play Composition"))
                .clicked()
            {
                let plan = self.session.composition.playback_plan();
                self.start_sequence(plan, SequenceKind::Composition);
            }

            if ui.button("Clear").clicked() {
                self.session.composition.clear();
                self.held_notes.clear();
            }

            ui.label(format!(
                "{} / {COMPOSITION_MAX_NOTES} notes",
                self.session.composition.len()
            ));
        });
    }

    fn draw_sour_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.sequence_running(), egui::Button::new("Start Round"))
                .clicked()
            {
                let round = crate::game::SourRound::generate(&mut self.rng);
                let plan = round.playback_plan();
                self.session.sour = Some(round);
                self.sour_mark = None;
                self.sour_positions_ready = false;
                self.sour_feedback = Feedback::neutral("Listen to the melody...");
                self.start_sequence(plan, SequenceKind::SourMelody);
            }

            let can_submit = self
                .session
                .sour
                .as_ref()
                .is_some_and(|round| round.can_submit())
                && !self.sequence_running();
            if ui
                .add_enabled(can_submit, egui::Button::new("Submit"))
                .clicked()
            {
                if let Some(outcome) = self.session.sour.as_mut().and_then(|r| r.submit()) {
                    self.session.add_points(outcome.points);
                    self.sour_mark = Some(if outcome.correct {
                        (outcome.sour_index, true)
                    } else {
                        (outcome.guessed_index, false)
                    });
                    self.sour_feedback = Feedback {
                        text: outcome.feedback,
                        tone: if outcome.correct { Tone::Good } else { Tone::Bad },
                    };
                }
            }
        });

        ui.add_space(6.0);

        if self.sour_positions_ready {
            let melody_len = self
                .session
                .sour
                .as_ref()
                .map(|r| r.melody().len())
                .unwrap_or(0);
            let selected = self.session.sour.as_ref().and_then(|r| r.selected());

            let mut clicked_position = None;
            ui.horizontal(|ui| {
                for i in 0..melody_len {
                    let fill = match self.sour_mark {
                        Some((mark, correct)) if mark == i => {
                            if correct {
                                GREEN
                            } else {
                                RED
                            }
                        }
                        _ if selected == Some(i) => AMBER_BRIGHT,
                        _ => AMBER,
                    };
                    let button = egui::Button::new(
                        egui::RichText::new(format!("Note {}", i + 1))
                            .color(egui::Color32::BLACK),
                    )
                    .fill(fill);
                    if ui.add(button).clicked() {
                        clicked_position = Some(i);
                    }
                }
            });

            if let Some(i) = clicked_position {
                let note = self.session.sour.as_ref().map(|r| r.melody()[i]);
                if let Some(note) = note {
                    self.play_note(note, Some(ADDITIONAL_SUSTAIN_MS));
                }
                if let Some(round) = self.session.sour.as_mut() {
                    round.select(i);
                }
            }
        }

        ui.add_space(6.0);
        ui.colored_label(self.sour_feedback.color(), &self.sour_feedback.text);
        ui.label(format!("Score: {}", self.session.score()));
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.separator();
        ui.horizontal(|ui| {
            let recent: Vec<&Notification> = self
                .notification_queue
                .iter()
                .rev()
                .filter(|n| n.is_recent(5000))
                .take(3)
                .collect();

            if recent.is_empty() {
                ui.weak("Ready");
            } else {
                for notification in recent {
                    let (icon, color) = match notification.level {
                        NotificationLevel::Info => ("ℹ", egui::Color32::from_rgb(100, 150, 255)),
                        NotificationLevel::Warning => ("⚠", egui::Color32::from_rgb(255, 165, 0)),
                        NotificationLevel::Error => ("✖", RED),
                    };
                    ui.colored_label(color, icon);
                    ui.colored_label(color, &notification.message);
                    ui.add_space(10.0);
                }
            }
        });
    }
}

impl eframe::App for RiyazApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint continuously so timed cues fire without input events.
        ctx.request_repaint();

        self.drain_notifications();
        self.tick_sequence();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Sitar Riyaz");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(egui::Slider::new(&mut self.volume_ui, 0.0..=1.0))
                        .changed()
                    {
                        self.volume_atomic.set(self.volume_ui);
                    }
                    ui.label("Volume:");
                });
            });
            ui.separator();

            self.draw_mode_tabs(ui);
            ui.add_space(10.0);

            self.draw_sitar_string(ui);
            ui.add_space(12.0);
            ui.separator();

            match self.session.mode() {
                Mode::Recognition => self.draw_recognition_panel(ui),
                Mode::Composition => self.draw_composition_panel(ui),
                Mode::SourNote => self.draw_sour_panel(ui),
            }

            ui.add_space(10.0);
            self.draw_status_bar(ui);
        });
    }
}
