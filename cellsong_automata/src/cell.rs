// Single automaton cell: a decaying activation value plus a liveness flag.
//
// A cell's `state` does double duty: it is the normalized control value the
// sequencer reads, and its nonzero-ness is the cell's "liveness" for rule
// evaluation. Liveness is double-buffered: `mark_aliveness()` snapshots
// `state > 0` into `alive` at the top of a generation transition, before
// any cell's transition reads a neighbor — so no cell's outcome depends on
// the order cells are evaluated within a sweep. `grid.rs` owns the
// two-phase sweep that enforces this.
//
// Cells are created once at grid construction and never destroyed; the
// only mutations are the per-generation transition and the loop-boundary
// restore.

use crate::rule::RuleConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One cell of the automaton grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Decaying activation level in [0, 1]. The value consumers read.
    pub state: f32,
    /// Liveness snapshot taken at the last generation boundary.
    pub alive: bool,
    /// State as originally seeded; restored on loop reset.
    pub initial_state: f32,
}

impl Cell {
    /// Seed a cell: with probability `density` it starts at a random state
    /// in (0, 1], otherwise dead at 0.
    pub fn seed<R: Rng + ?Sized>(density: f32, rng: &mut R) -> Self {
        let state = if rng.random::<f32>() < density {
            // random::<f32>() is [0, 1); flip it so a seeded cell is
            // never born already dead.
            1.0 - rng.random::<f32>()
        } else {
            0.0
        };
        Self::from_state(state)
    }

    /// A cell with an explicit state, recorded as its seed.
    pub fn from_state(state: f32) -> Self {
        Self {
            state,
            alive: state > 0.0,
            initial_state: state,
        }
    }

    /// Snapshot liveness for the coming transition: `alive = state > 0`.
    ///
    /// Must run for every cell in the grid before any cell's `evaluate`
    /// reads a neighbor's `alive` flag.
    pub fn mark_aliveness(&mut self) {
        self.alive = self.state > 0.0;
    }

    /// Apply one generation transition given the number of live neighbors
    /// (counted against the aliveness snapshot).
    ///
    /// A dead cell whose count matches the live rule is born at full
    /// state, regardless of any partial decay it died with. A live cell
    /// whose count matches the die rule loses `1 / states`, floored at
    /// zero. Any other count leaves the cell unchanged — stasis is the
    /// default.
    pub fn evaluate(&mut self, alive_neighbors: u8, rules: &RuleConfig) {
        if !self.alive && rules.births_at(alive_neighbors) {
            self.state = 1.0;
        } else if self.alive && rules.decays_at(alive_neighbors) {
            self.state = (self.state - rules.decay_step()).max(0.0);
        }
    }

    /// Restore the seeded state (loop boundary).
    pub fn restore_seed(&mut self) {
        self.state = self.initial_state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleConfig {
        RuleConfig {
            live_rule: vec![2, 3],
            die_rule: vec![5, 6, 7, 8],
            density: 0.5,
            states: 8,
            loop_length: None,
        }
    }

    #[test]
    fn birth_lands_exactly_at_full_state() {
        let mut cell = Cell::from_state(0.0);
        cell.mark_aliveness();
        cell.evaluate(3, &rules());
        assert_eq!(cell.state, 1.0);
    }

    #[test]
    fn decay_subtracts_exactly_one_step() {
        let mut cell = Cell::from_state(1.0);
        cell.mark_aliveness();
        cell.evaluate(5, &rules());
        assert_eq!(cell.state, 0.875);
        cell.mark_aliveness();
        cell.evaluate(6, &rules());
        assert_eq!(cell.state, 0.75);
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut cell = Cell::from_state(0.05);
        cell.mark_aliveness();
        cell.evaluate(8, &rules());
        assert_eq!(cell.state, 0.0);
        // Dead now: another die-rule match must not push below zero.
        cell.mark_aliveness();
        cell.evaluate(8, &rules());
        assert_eq!(cell.state, 0.0);
    }

    #[test]
    fn stasis_when_count_matches_neither_rule() {
        let mut cell = Cell::from_state(0.5);
        cell.mark_aliveness();
        cell.evaluate(4, &rules());
        assert_eq!(cell.state, 0.5);

        let mut dead = Cell::from_state(0.0);
        dead.mark_aliveness();
        dead.evaluate(1, &rules());
        assert_eq!(dead.state, 0.0);
    }

    #[test]
    fn dead_cell_ignores_die_rule() {
        let mut cell = Cell::from_state(0.0);
        cell.mark_aliveness();
        cell.evaluate(5, &rules());
        assert_eq!(cell.state, 0.0);
    }

    #[test]
    fn live_cell_ignores_live_rule() {
        // A live cell whose count matches the live rule keeps its partial
        // state — birth applies only to dead cells.
        let mut cell = Cell::from_state(0.25);
        cell.mark_aliveness();
        cell.evaluate(3, &rules());
        assert_eq!(cell.state, 0.25);
    }

    #[test]
    fn aliveness_tracks_state_only_when_marked() {
        let mut cell = Cell::from_state(0.0);
        cell.state = 0.6;
        // Not marked yet: still considered dead for rule eligibility.
        assert!(!cell.alive);
        cell.mark_aliveness();
        assert!(cell.alive);
    }

    #[test]
    fn restore_seed_returns_to_initial_state() {
        let mut cell = Cell::from_state(0.75);
        cell.mark_aliveness();
        cell.evaluate(5, &rules());
        assert_ne!(cell.state, 0.75);
        cell.restore_seed();
        assert_eq!(cell.state, 0.75);
    }

    #[test]
    fn seed_density_extremes() {
        // Density 0 never seeds, density 1 always seeds alive.
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(Cell::seed(0.0, &mut rng).state, 0.0);
        }
        for _ in 0..100 {
            let cell = Cell::seed(1.0, &mut rng);
            assert!(cell.state > 0.0 && cell.state <= 1.0);
            assert!(cell.alive);
            assert_eq!(cell.state, cell.initial_state);
        }
    }
}
