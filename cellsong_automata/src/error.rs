// Error types for the automaton engine.
//
// Two classes, both caller-facing and immediate: `ConfigError` for invalid
// construction parameters (fatal, never retried) and `RowError` for
// out-of-range row access (a caller bug). The engine is pure in-memory
// computation, so there is no transient-failure class — after successful
// construction every operation either succeeds or reports a caller bug.
//
// Note the asymmetry with state clamping: computed cell state is clamped to
// [0, 1] as a domain rule (decay floor, birth ceiling), but out-of-range
// *input* is never silently clamped — it lands here.

/// Invalid construction parameters. Surfaced before any cell is allocated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Grid width must be nonzero — it defines the sequencer sweep length.
    #[error("grid width must be nonzero")]
    ZeroWidth,

    /// Grid height must be nonzero.
    #[error("grid height must be nonzero")]
    ZeroHeight,

    /// `states` is the decay denominator; zero would divide by zero.
    #[error("decay states must be at least 1")]
    ZeroStates,

    /// Seed density is a probability.
    #[error("seed density must be within [0, 1], got {0}")]
    DensityOutOfRange(f32),

    /// A loop of zero generations would reseed before ever evolving.
    #[error("loop length must be at least 1 generation")]
    ZeroLoopLength,

    /// An 8-connected neighborhood can never produce this count.
    #[error("rule neighbor count {0} exceeds the 8-cell neighborhood")]
    RuleCountOutOfRange(u8),

    /// Explicit cell layout does not match the grid dimensions.
    #[error("cell state layout mismatch: expected {expected} values, got {got}")]
    StateCountMismatch {
        /// `width * height` of the requested grid.
        expected: usize,
        /// Number of values actually supplied.
        got: usize,
    },
}

/// Out-of-range row access on `row()` or `current_column_value()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("row {row} out of range for grid of height {height}")]
pub struct RowError {
    /// The requested row index.
    pub row: usize,
    /// The grid's height.
    pub height: usize,
}
