// Note set and fixed game tables
// The twelve swaras of the sitar string, their audio asset mapping,
// and the level/timing constants shared by all game modes.

/// One of the twelve fixed swaras playable on the sitar string.
///
/// The suffix `2` marks the raised variant of the swara, matching the
/// labels printed on the note buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
    Sa,
    Ri,
    Ri2,
    Ga,
    Ga2,
    Ma,
    Ma2,
    Pa,
    Dha,
    Dha2,
    Ni,
    Ni2,
}

impl Note {
    /// All twelve swaras in string order (low to high).
    pub const ALL: [Note; 12] = [
        Note::Sa,
        Note::Ri,
        Note::Ri2,
        Note::Ga,
        Note::Ga2,
        Note::Ma,
        Note::Ma2,
        Note::Pa,
        Note::Dha,
        Note::Dha2,
        Note::Ni,
        Note::Ni2,
    ];

    /// Tamil label shown on the note button.
    pub fn label(self) -> &'static str {
        match self {
            Note::Sa => "ச",
            Note::Ri => "ரி",
            Note::Ri2 => "ரி2",
            Note::Ga => "க",
            Note::Ga2 => "க2",
            Note::Ma => "மா",
            Note::Ma2 => "மா2",
            Note::Pa => "பா",
            Note::Dha => "தா",
            Note::Dha2 => "தா2",
            Note::Ni => "நி",
            Note::Ni2 => "நி2",
        }
    }

    /// File stem of the WAV asset for this swara (`note_1` .. `note_12`).
    pub fn file_stem(self) -> &'static str {
        match self {
            Note::Sa => "note_1",
            Note::Ri => "note_2",
            Note::Ri2 => "note_3",
            Note::Ga => "note_4",
            Note::Ga2 => "note_5",
            Note::Ma => "note_6",
            Note::Ma2 => "note_7",
            Note::Pa => "note_8",
            Note::Dha => "note_9",
            Note::Dha2 => "note_10",
            Note::Ni => "note_11",
            Note::Ni2 => "note_12",
        }
    }

    /// Position of this swara on the string (0-based).
    pub fn index(self) -> usize {
        Note::ALL
            .iter()
            .position(|n| *n == self)
            .unwrap_or_default()
    }
}

/// Difficulty level configuration: how many notes a pattern holds and
/// how many points a correct answer is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub pattern_length: usize,
    pub points: u32,
}

/// Fixed level table. Index with [`level_config`].
pub const LEVELS: [Level; 3] = [
    Level {
        pattern_length: 3,
        points: 10,
    },
    Level {
        pattern_length: 3,
        points: 20,
    },
    Level {
        pattern_length: 5,
        points: 30,
    },
];

/// Look up a level by its 1-based number, clamped to the table.
pub fn level_config(level: u8) -> Level {
    let idx = (level.clamp(1, LEVELS.len() as u8) - 1) as usize;
    LEVELS[idx]
}

/// Delay between notes when the app plays a pattern back.
pub const PATTERN_PLAYBACK_INTERVAL_MS: u64 = 800;

/// Lead-in before the first note of a pattern playback.
pub const PATTERN_LEAD_IN_MS: u64 = 500;

/// Extra fade-out time added to every triggered note.
pub const ADDITIONAL_SUSTAIN_MS: u64 = 500;

/// Gap between notes when replaying a composition.
pub const COMPOSITION_GAP_MS: u64 = 500;

/// Fixed note duration used for composition playback (recorded sustain
/// shapes only the live preview, not the replay).
pub const COMPOSITION_NOTE_MS: u64 = 200;

/// Hard cap on recorded composition entries.
pub const COMPOSITION_MAX_NOTES: usize = 8;

/// Points awarded for finding the sour note.
pub const SOUR_NOTE_POINTS: u32 = 20;

/// Stagger between button flashes in the success animation.
pub const SUCCESS_STAGGER_MS: u64 = 50;

/// How long a button stays visually highlighted.
pub const HIGHLIGHT_MS: u64 = 200;
