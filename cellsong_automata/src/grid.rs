// Dense 2D cell matrix for the automaton.
//
// The grid is stored as a flat `Vec<Cell>` indexed by `x + y * width`,
// giving O(1) access and cache-friendly row reads. Size is fixed for the
// grid's lifetime — cells are seeded once at construction and only ever
// mutated by the generation sweep or the loop restore.
//
// Neighbor counting examines the 8-connected neighborhood with CLAMPED
// edges: cells outside the grid simply do not exist and contribute nothing.
// There is no toroidal wraparound.
//
// The generation sweep is two-phase by construction: phase one snapshots
// every cell's liveness, phase two counts neighbors against that snapshot
// and applies the pure per-cell transition. No cell's outcome can depend on
// another cell's transition within the same sweep.
//
// See also: `cell.rs` for the per-cell transition, `engine.rs` which owns
// the grid and decides when a sweep happens.

use crate::cell::Cell;
use crate::rule::RuleConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-size 2D matrix of automaton cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    /// Flat storage: index = x + y * width.
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl CellGrid {
    /// Allocate and seed a grid, one independent density-weighted draw per
    /// cell. Dimensions are validated by the caller (`Automaton::new`).
    pub fn seeded<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        density: f32,
        rng: &mut R,
    ) -> Self {
        let cells = (0..width * height)
            .map(|_| Cell::seed(density, rng))
            .collect();
        Self {
            cells,
            width,
            height,
        }
    }

    /// Build a grid from explicit states, row-major. Each value becomes
    /// both the cell's state and its seed.
    pub fn from_states(width: usize, height: usize, states: &[f32]) -> Self {
        debug_assert_eq!(states.len(), width * height);
        Self {
            cells: states.iter().map(|&s| Cell::from_state(s)).collect(),
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at (x, y). Callers index within bounds; the engine
    /// validates row indices at its boundary.
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[x + y * self.width]
    }

    /// Count the 8-connected neighbors of (x, y) satisfying `predicate`.
    /// Out-of-grid positions are skipped (clamped edges, no wraparound).
    /// Never mutates any cell.
    pub fn count_neighbors_where<F>(&self, x: usize, y: usize, predicate: F) -> u8
    where
        F: Fn(&Cell) -> bool,
    {
        let mut count = 0;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                    continue;
                }
                if predicate(self.cell(nx as usize, ny as usize)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Count live neighbors of (x, y) against the aliveness snapshot.
    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        self.count_neighbors_where(x, y, |cell| cell.alive)
    }

    /// Run one full generation sweep.
    ///
    /// Phase one marks aliveness for every cell; phase two counts each
    /// cell's live neighbors against that snapshot, then applies the pure
    /// transition. Counting completes for the whole grid before any state
    /// is written, so the sweep is order-independent.
    pub fn advance_generation(&mut self, rules: &RuleConfig) {
        for cell in &mut self.cells {
            cell.mark_aliveness();
        }
        let counts: Vec<u8> = (0..self.cells.len())
            .map(|i| self.count_alive_neighbors(i % self.width, i / self.width))
            .collect();
        for (cell, &count) in self.cells.iter_mut().zip(counts.iter()) {
            cell.evaluate(count, rules);
        }
    }

    /// Restore every cell to its seeded state (loop boundary).
    pub fn restore_seeds(&mut self) {
        for cell in &mut self.cells {
            cell.restore_seed();
        }
    }

    /// Owned snapshot of row `y`'s states, left to right. The engine
    /// bounds-checks `y`; this slices directly.
    pub fn row_states(&self, y: usize) -> Vec<f32> {
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .map(|cell| cell.state)
            .collect()
    }

    /// Number of cells currently holding a nonzero state.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.state > 0.0).count()
    }
}
