// Cellsong sequencer glue.
//
// Everything around the automaton core that touches the outside world lives
// here. The core (`cellsong_automata`) emits normalized row values; this
// crate turns them into music and pictures:
//
// - scale.rs:  Scale kinds and note tables — maps a normalized cell value
//              to a MIDI pitch through a two-octave scale table.
// - driver.rs: SequencerDriver — per-tick consumer of the engine: advances
//              it, reads the pitch and gate rows, emits note events.
// - render.rs: Read-only terminal preview of the grid (truecolor swatches
//              plus a plain-glyph fallback).
// - midi.rs:   Offline capture of a performance to a Standard MIDI File.
// - main.rs:   The `play` binary — flag parsing, seeded RNG setup, run
//              loop, optional live cadence and preview, MIDI output.
//
// Timer scheduling is deliberately absent from the library: the driver
// computes its step interval but never sleeps — cadence belongs to the
// binary (or any other host). Audio synthesis is out of scope entirely;
// MIDI capture is the offline stand-in for a renderer.

pub mod driver;
pub mod midi;
pub mod render;
pub mod scale;
