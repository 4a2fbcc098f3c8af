// cellsong_automata — pure Rust automaton engine for the Cellsong sequencer.
//
// This crate contains the stateful core of Cellsong: a decaying "Generations"
// cellular automaton whose grid doubles as a step-sequencer pattern. Each
// cell holds a normalized activation value in [0, 1]; the sequencer reads one
// row as pitch selectors and another as gate levels, one column per tick.
// The crate has zero audio, terminal, or timer dependencies and can be
// tested and benchmarked headless.
//
// Module overview:
// - `cell.rs`:   Cell lifecycle — seeding, birth/decay transition, liveness
//                snapshot, loop restore.
// - `grid.rs`:   CellGrid — dense 2D cell matrix, clamped-edge neighbor
//                counting, the two-phase generation sweep.
// - `rule.rs`:   RuleConfig — live/die neighbor-count sets, seed density,
//                decay granularity, optional loop length, validation.
// - `engine.rs`: Automaton — column cursor, generation counter, step/loop
//                scheduling, row extraction.
// - `error.rs`:  ConfigError (invalid construction) and RowError
//                (out-of-range row access).
//
// The companion crate `cellsong_seq` consumes this library's read surface
// (rows and per-column values) and owns everything with an outside edge:
// scale lookup, tick timing, terminal preview, MIDI capture. That boundary
// is enforced at the compiler level — this crate cannot depend on timing,
// rendering, or note tables.
//
// **Critical constraint: determinism.** The engine is a pure state machine:
// all randomness enters once, through the RNG injected at construction for
// seeding. Given the same seed and the same number of `step()` calls, two
// engines hold identical state. No system time, no OS entropy, no I/O.

pub mod cell;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rule;
