// Automaton engine: the grid plus its rules, cursor, and loop scheduling.
//
// `Automaton` is the single source of truth for a running pattern. It owns
// the cell matrix, the rule config, the sequencer cursor (current read
// column), and the generation counter. The engine advances only through
// `step()`: one call per sequencer tick, and exactly one generation
// transition per `width` calls — the grid evolves once per full sweep of
// the pattern, so the audible pattern is stable for a whole bar before it
// mutates.
//
// The looping variant discards the evolved pattern every `loop_length`
// generations and restores every cell to its originally seeded state,
// trading open-ended evolution for a periodic phrase.
//
// Consumers read rows as owned snapshots (`row()`), or a single value at
// the cursor (`current_column_value()`). Reads never mutate and rows are
// copies — nothing outside the engine can alias its cells.
//
// See also: `grid.rs` for the two-phase sweep, `rule.rs` for `RuleConfig`,
// `error.rs` for the failure taxonomy.
//
// **Critical constraint: determinism.** All randomness enters once, via
// the RNG injected at construction. Timer cadence lives with the caller;
// `step()` never blocks, suspends, or performs I/O.

use crate::error::{ConfigError, RowError};
use crate::grid::CellGrid;
use crate::rule::RuleConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A running Generations automaton.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Automaton {
    grid: CellGrid,
    rules: RuleConfig,
    /// Current sequencer read column, in [0, width).
    cursor: usize,
    /// Completed full sweeps since construction (or since the last loop
    /// reseed).
    generation: u64,
}

impl Automaton {
    /// Validate, allocate, and seed a new engine.
    ///
    /// Every cell draws independently from `rng` with probability
    /// `rules.density` of starting alive. Fails with `ConfigError` on zero
    /// dimensions or an invalid rule set, before any cell is allocated.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        rules: RuleConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        Self::validate_dimensions(width, height, &rules)?;
        let grid = CellGrid::seeded(width, height, rules.density, rng);
        Ok(Self {
            grid,
            rules,
            cursor: 0,
            generation: 0,
        })
    }

    /// Build an engine from explicit row-major cell states instead of
    /// random seeding. Each value becomes the cell's state and its seed.
    pub fn from_states(
        width: usize,
        height: usize,
        rules: RuleConfig,
        states: &[f32],
    ) -> Result<Self, ConfigError> {
        Self::validate_dimensions(width, height, &rules)?;
        if states.len() != width * height {
            return Err(ConfigError::StateCountMismatch {
                expected: width * height,
                got: states.len(),
            });
        }
        Ok(Self {
            grid: CellGrid::from_states(width, height, states),
            rules,
            cursor: 0,
            generation: 0,
        })
    }

    fn validate_dimensions(
        width: usize,
        height: usize,
        rules: &RuleConfig,
    ) -> Result<(), ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        rules.validate()
    }

    /// Advance one sequencer tick.
    ///
    /// Moves the cursor one column right; on wraparound the cursor resets,
    /// the generation counter increments, and the grid runs one generation
    /// transition (or, in the looping variant, reseeds when the counter
    /// reaches `loop_length`). Returns `true` iff this call crossed a
    /// generation boundary.
    pub fn step(&mut self) -> bool {
        self.cursor += 1;
        if self.cursor < self.grid.width() {
            return false;
        }
        self.cursor = 0;
        self.generation += 1;
        if let Some(loop_length) = self.rules.loop_length {
            if self.generation >= loop_length {
                // Loop boundary: restore the seeded pattern and skip rule
                // evaluation for this sweep.
                self.grid.restore_seeds();
                self.generation = 0;
                return true;
            }
        }
        self.grid.advance_generation(&self.rules);
        true
    }

    /// Owned snapshot of row `y`'s states. Idempotent between steps.
    pub fn row(&self, y: usize) -> Result<Vec<f32>, RowError> {
        self.check_row(y)?;
        Ok(self.grid.row_states(y))
    }

    /// The state at the cursor column of row `y` — "the value under the
    /// playhead".
    pub fn current_column_value(&self, y: usize) -> Result<f32, RowError> {
        self.check_row(y)?;
        Ok(self.grid.cell(self.cursor, y).state)
    }

    fn check_row(&self, y: usize) -> Result<(), RowError> {
        if y >= self.grid.height() {
            return Err(RowError {
                row: y,
                height: self.grid.height(),
            });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Current read column, in [0, width).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Completed sweeps since construction or the last loop reseed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Number of cells currently holding a nonzero state.
    pub fn population(&self) -> usize {
        self.grid.population()
    }
}
