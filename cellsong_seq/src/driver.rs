// Sequencer driver: the fixed-cadence consumer of the automaton.
//
// The driver owns an engine and a scale and does one thing per tick:
// advance the engine one column, read the pitch row and the gate row, and
// report what the playhead landed on. Pitch-row values map through the
// scale table; the gate-row value at the cursor decides whether a note
// sounds (below the gate threshold the step is silent) and how hard it
// is struck.
//
// The driver computes its own step interval from the tempo but never
// sleeps — timer cadence belongs to the host. Which rows carry pitch and
// gate duty is configuration, not engine knowledge.
//
// See also: `scale.rs` for the value-to-pitch mapping, `midi.rs` which
// replays driver ticks into a MIDI file.

use cellsong_automata::engine::Automaton;
use cellsong_automata::error::RowError;
use crate::scale::Scale;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Step-interval multipliers hosts can cycle through: double time,
/// dotted, straight, and half time against the beat.
pub const RATE_MULTIPLIERS: [f32; 4] = [2.0, 1.5, 1.0, 0.5];

/// Driver tuning. Row indices are validated against the engine at
/// construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Beats per minute; one undivided step per beat.
    pub bpm: f32,
    /// Step-interval multiplier (see `RATE_MULTIPLIERS`).
    pub rate: f32,
    /// Gate values below this leave the step silent.
    pub gate_threshold: f32,
    /// Row read as pitch selectors.
    pub pitch_row: usize,
    /// Row read as gate levels.
    pub gate_row: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            rate: 1.0,
            gate_threshold: 0.1,
            pitch_row: 0,
            gate_row: 1,
        }
    }
}

/// A note struck at the playhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI pitch.
    pub key: u8,
    /// Strike velocity, scaled from the gate level.
    pub velocity: u8,
}

/// Everything one tick produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    /// Playhead column after this tick.
    pub cursor: usize,
    /// True iff this tick crossed a generation boundary.
    pub generation_boundary: bool,
    /// The whole pitch row, mapped through the scale.
    pub pitches: Vec<u8>,
    /// The whole gate row, raw.
    pub gates: Vec<f32>,
    /// The note at the playhead, or `None` when gated off.
    pub note: Option<NoteEvent>,
}

/// Fixed-cadence sequencer reading a cellular automaton as its pattern.
#[derive(Debug, Clone)]
pub struct SequencerDriver {
    engine: Automaton,
    scale: Scale,
    config: DriverConfig,
}

impl SequencerDriver {
    /// Wire a driver to an engine. Fails if a configured row index is
    /// outside the engine's grid.
    pub fn new(
        engine: Automaton,
        scale: Scale,
        config: DriverConfig,
    ) -> Result<Self, RowError> {
        // Probe both rows once so a bad config fails here, not mid-tick.
        engine.row(config.pitch_row)?;
        engine.row(config.gate_row)?;
        Ok(Self {
            engine,
            scale,
            config,
        })
    }

    /// Milliseconds between steps: one beat at the configured tempo,
    /// scaled by the rate multiplier.
    pub fn step_interval(&self) -> Duration {
        let beat_ms = 60_000.0 / self.config.bpm;
        Duration::from_millis((beat_ms * self.config.rate) as u64)
    }

    /// Advance one tick: step the engine, then read both rows at the new
    /// playhead position.
    pub fn tick(&mut self) -> Result<TickOutput, RowError> {
        let generation_boundary = self.engine.step();
        let cursor = self.engine.cursor();

        let pitches: Vec<u8> = self
            .engine
            .row(self.config.pitch_row)?
            .into_iter()
            .map(|v| self.scale.note_for(v))
            .collect();
        let gates = self.engine.row(self.config.gate_row)?;

        let gate = gates[cursor];
        let note = (gate >= self.config.gate_threshold).then(|| NoteEvent {
            key: pitches[cursor],
            velocity: velocity_for(gate),
        });

        Ok(TickOutput {
            cursor,
            generation_boundary,
            pitches,
            gates,
            note,
        })
    }

    pub fn engine(&self) -> &Automaton {
        &self.engine
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
}

/// Map a gate level to a MIDI velocity in 1..=127.
fn velocity_for(gate: f32) -> u8 {
    1 + (gate.clamp(0.0, 1.0) * 126.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsong_automata::rule::RuleConfig;
    use crate::scale::ScaleKind;

    /// Engine whose pattern never changes: empty rules keep every cell in
    /// stasis, so tick outputs are fully predictable.
    fn static_engine(pitch_states: &[f32], gate_states: &[f32]) -> Automaton {
        let rules = RuleConfig {
            live_rule: vec![],
            die_rule: vec![],
            density: 0.5,
            states: 8,
            loop_length: None,
        };
        let mut states = pitch_states.to_vec();
        states.extend_from_slice(gate_states);
        Automaton::from_states(pitch_states.len(), 2, rules, &states).unwrap()
    }

    fn scale() -> Scale {
        Scale::new(ScaleKind::Major, 48)
    }

    #[test]
    fn bad_row_config_fails_at_construction() {
        let engine = static_engine(&[0.0; 4], &[0.0; 4]);
        let config = DriverConfig {
            gate_row: 7,
            ..DriverConfig::default()
        };
        assert!(SequencerDriver::new(engine, scale(), config).is_err());
    }

    #[test]
    fn gated_step_produces_a_note() {
        let engine = static_engine(&[0.0, 0.0, 0.0, 0.0], &[1.0, 1.0, 1.0, 1.0]);
        let mut driver =
            SequencerDriver::new(engine, scale(), DriverConfig::default()).unwrap();
        let out = driver.tick().unwrap();
        assert_eq!(out.cursor, 1);
        let note = out.note.unwrap();
        // Pitch value 0.0 selects the top of the accent octave (C4 root
        // scale: table[0] = 60); full gate strikes at max velocity.
        assert_eq!(note.key, 60);
        assert_eq!(note.velocity, 127);
    }

    #[test]
    fn below_threshold_is_silent() {
        let engine = static_engine(&[0.5; 4], &[0.05; 4]);
        let mut driver =
            SequencerDriver::new(engine, scale(), DriverConfig::default()).unwrap();
        let out = driver.tick().unwrap();
        assert_eq!(out.note, None);
        // The rows are still reported for consumers that want them.
        assert_eq!(out.gates, vec![0.05; 4]);
        assert_eq!(out.pitches.len(), 4);
    }

    #[test]
    fn boundary_flag_mirrors_engine_cadence() {
        let engine = static_engine(&[0.0; 4], &[0.0; 4]);
        let mut driver =
            SequencerDriver::new(engine, scale(), DriverConfig::default()).unwrap();
        let boundaries: Vec<bool> = (0..8)
            .map(|_| driver.tick().unwrap().generation_boundary)
            .collect();
        assert_eq!(
            boundaries,
            vec![false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn step_interval_follows_bpm_and_rate() {
        let engine = static_engine(&[0.0; 4], &[0.0; 4]);
        let config = DriverConfig {
            bpm: 120.0,
            rate: 1.0,
            ..DriverConfig::default()
        };
        let driver = SequencerDriver::new(engine, scale(), config).unwrap();
        assert_eq!(driver.step_interval(), Duration::from_millis(500));

        let engine = static_engine(&[0.0; 4], &[0.0; 4]);
        let config = DriverConfig {
            bpm: 120.0,
            rate: 0.5,
            ..DriverConfig::default()
        };
        let driver = SequencerDriver::new(engine, scale(), config).unwrap();
        assert_eq!(driver.step_interval(), Duration::from_millis(250));
    }

    #[test]
    fn velocity_scales_with_gate() {
        assert_eq!(velocity_for(0.0), 1);
        assert_eq!(velocity_for(1.0), 127);
        assert_eq!(velocity_for(0.5), 64);
        // Out-of-range gates clamp.
        assert_eq!(velocity_for(2.0), 127);
    }

    #[test]
    fn pitch_row_maps_through_scale() {
        let engine = static_engine(&[0.0, 1.0, 0.0, 1.0], &[1.0; 4]);
        let mut driver =
            SequencerDriver::new(engine, scale(), DriverConfig::default()).unwrap();
        let out = driver.tick().unwrap();
        let table = scale().note_table();
        assert_eq!(
            out.pitches,
            vec![table[0], *table.last().unwrap(), table[0], *table.last().unwrap()]
        );
    }
}
