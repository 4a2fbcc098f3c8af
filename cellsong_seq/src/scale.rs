// Scale tables: from normalized cell values to MIDI pitches.
//
// The automaton emits values in [0, 1]; a `Scale` turns them into notes.
// Each scale kind is defined by its seven semitone intervals from the
// root. The lookup table spans two octaves — the seven degrees of the
// accent octave (one octave above the root) stacked before the seven of
// the base octave — and a value `v` selects `table[floor(v * (len - 1))]`,
// so hotter cells land in the lower register and cooling cells drift up.
//
// The root and kind are explicit configuration: callers that want the
// "surprise key" behavior draw one through `Scale::random` with their own
// RNG. Nothing here reads ambient state.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The five scale kinds the sequencer draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    /// Major: the Ionian pattern.
    Major,
    /// Natural minor: the Aeolian pattern.
    Minor,
    /// Lydian: major with a raised 4th.
    Lydian,
    /// Mixolydian: major with a lowered 7th.
    Mixolydian,
    /// Phrygian: minor with a lowered 2nd.
    Phrygian,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 5] = [
        ScaleKind::Major,
        ScaleKind::Minor,
        ScaleKind::Lydian,
        ScaleKind::Mixolydian,
        ScaleKind::Phrygian,
    ];

    /// Semitone intervals from the root to each of the seven degrees.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            ScaleKind::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleKind::Minor => [0, 2, 3, 5, 7, 8, 10],
            ScaleKind::Lydian => [0, 2, 4, 6, 7, 9, 11],
            ScaleKind::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            ScaleKind::Phrygian => [0, 1, 3, 5, 7, 8, 10],
        }
    }

    /// Parse a kind from its lowercase name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "major" => Some(ScaleKind::Major),
            "minor" => Some(ScaleKind::Minor),
            "lydian" => Some(ScaleKind::Lydian),
            "mixolydian" => Some(ScaleKind::Mixolydian),
            "phrygian" => Some(ScaleKind::Phrygian),
            _ => None,
        }
    }
}

/// A concrete scale: a kind rooted at a MIDI note.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scale {
    pub kind: ScaleKind,
    /// MIDI note of the base-octave root.
    pub root: u8,
}

/// Lowest root `Scale::random` will pick (MIDI 32, G#1).
const RANDOM_ROOT_LOW: u8 = 32;
/// Span of the random root range in semitones (two octaves).
const RANDOM_ROOT_SPAN: u8 = 24;

impl Scale {
    /// The root is capped so the whole two-octave table stays within the
    /// MIDI range.
    pub fn new(kind: ScaleKind, root: u8) -> Self {
        Scale {
            kind,
            root: root.min(103),
        }
    }

    /// Draw a random kind and a root within a two-octave bass range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = ScaleKind::ALL[rng.random_range(0..ScaleKind::ALL.len())];
        let root = RANDOM_ROOT_LOW + rng.random_range(0..=RANDOM_ROOT_SPAN);
        Scale { kind, root }
    }

    /// The fourteen-entry lookup table: accent octave first, then base.
    pub fn note_table(&self) -> Vec<u8> {
        let intervals = self.kind.intervals();
        let accent = intervals.iter().map(|&iv| self.root + 12 + iv);
        let base = intervals.iter().map(|&iv| self.root + iv);
        accent.chain(base).collect()
    }

    /// Map a normalized value to a pitch: `table[floor(v * (len - 1))]`.
    /// Values outside [0, 1] are clamped.
    pub fn note_for(&self, v: f32) -> u8 {
        let table = self.note_table();
        let idx = (v.clamp(0.0, 1.0) * (table.len() - 1) as f32).floor() as usize;
        table[idx]
    }

    /// Whether a MIDI pitch is one of this scale's pitch classes.
    pub fn contains(&self, pitch: u8) -> bool {
        let pc = (pitch + 12 - self.root % 12) % 12;
        self.kind.intervals().contains(&pc)
    }
}

/// Equal-temperament frequency of a MIDI note (A4 = 69 = 440 Hz).
pub fn frequency(midi: u8) -> f32 {
    440.0 * 2.0_f32.powf((midi as f32 - 69.0) / 12.0)
}

/// Compact note name for a MIDI pitch (e.g. "C4", "F#3").
pub fn note_name(midi: u8) -> String {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
    ];
    let octave = midi / 12;
    format!("{}{}", NAMES[(midi % 12) as usize], octave as i8 - 1)
}
