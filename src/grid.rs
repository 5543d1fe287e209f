//! The cell-state surface of one board.
//!
//! Four mask layers (ship occupancy, hits, misses, sunk) combine into a
//! derived [`CellState`] per cell, with precedence sunk > hit > miss >
//! ship > empty. Cells move monotonically toward revealed states; the
//! only sanctioned reversal is the Carrier phantom hull, which parks a
//! real hit in the miss layer until it is revealed.

use serde::Serialize;

use crate::common::Coord;
use crate::config::GRID_SIZE;
use crate::mask::Mask;
use crate::ship::{Orientation, ShipInstance};

type Layer = Mask<u128, GRID_SIZE>;

/// Observable state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Empty,
    Ship,
    Hit,
    Miss,
    Sunk,
}

/// Full cell matrix, as handed across the UI and advisor boundaries.
pub type CellMatrix = [[CellState; GRID_SIZE]; GRID_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    ship: Layer,
    hits: Layer,
    misses: Layer,
    sunk: Layer,
}

impl Grid {
    pub fn new() -> Self {
        Grid::default()
    }

    /// Derived state of the cell at `c`.
    pub fn cell(&self, c: Coord) -> CellState {
        let at = |layer: &Layer| layer.get(c.row, c.col).unwrap_or(false);
        if at(&self.sunk) {
            CellState::Sunk
        } else if at(&self.hits) {
            CellState::Hit
        } else if at(&self.misses) {
            CellState::Miss
        } else if at(&self.ship) {
            CellState::Ship
        } else {
            CellState::Empty
        }
    }

    /// True when the cell already shows hit, miss, or sunk.
    pub fn is_revealed(&self, c: Coord) -> bool {
        let revealed = self.hits | self.misses | self.sunk;
        revealed.get(c.row, c.col).unwrap_or(false)
    }

    pub fn has_ship(&self, c: Coord) -> bool {
        self.ship.get(c.row, c.col).unwrap_or(false)
    }

    /// True iff the run of `length` cells starting at (row, col) lies
    /// entirely in-bounds and every cell is empty.
    pub fn can_place(&self, row: usize, col: usize, length: usize, orientation: Orientation) -> bool {
        for i in 0..length {
            let (r, c) = match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            };
            if r >= GRID_SIZE || c >= GRID_SIZE {
                return false;
            }
            if self.cell(Coord::new(r, c)) != CellState::Empty {
                return false;
            }
        }
        true
    }

    pub(crate) fn mark_ship_run(&mut self, ship: &ShipInstance) {
        for c in ship.coords() {
            let _ = self.ship.set(c.row, c.col);
        }
    }

    pub(crate) fn mark_hit(&mut self, c: Coord) {
        let _ = self.hits.set(c.row, c.col);
    }

    pub(crate) fn mark_miss(&mut self, c: Coord) {
        let _ = self.misses.set(c.row, c.col);
    }

    /// Marks a cell sunk. Sunk takes over the cell outright, so any
    /// phantom-hull miss flag parked there is dropped.
    pub(crate) fn mark_sunk(&mut self, c: Coord) {
        let _ = self.sunk.set(c.row, c.col);
        let _ = self.misses.unset(c.row, c.col);
    }

    /// Flips a concealed Carrier hit from displayed-miss to hit.
    pub(crate) fn reveal_concealed(&mut self, c: Coord) {
        let _ = self.misses.unset(c.row, c.col);
        let _ = self.hits.set(c.row, c.col);
    }

    /// Cells of still-unstruck ship segments: occupied, and not in any
    /// revealed layer. Death-rattle targets are drawn from this set.
    pub(crate) fn hidden_ship_cells(&self) -> Vec<Coord> {
        let eligible = self.ship & !(self.hits | self.misses | self.sunk);
        eligible.iter_set().map(|(r, c)| Coord::new(r, c)).collect()
    }

    /// Full cell matrix snapshot.
    pub fn cells(&self) -> CellMatrix {
        let mut out = [[CellState::Empty; GRID_SIZE]; GRID_SIZE];
        for (r, out_row) in out.iter_mut().enumerate() {
            for (c, cell) in out_row.iter_mut().enumerate() {
                *cell = self.cell(Coord::new(r, c));
            }
        }
        out
    }

    /// Cell matrix with unstruck ships disguised as empty water; this is
    /// the only view the opponent advisor ever sees.
    pub fn hidden_view(&self) -> CellMatrix {
        let mut view = self.cells();
        for row in view.iter_mut() {
            for cell in row.iter_mut() {
                if *cell == CellState::Ship {
                    *cell = CellState::Empty;
                }
            }
        }
        view
    }

    /// Count of revealed cells, used by tests to check monotonicity.
    pub fn revealed_count(&self) -> usize {
        (self.hits | self.misses | self.sunk).count_ones()
    }

    /// Count of ship-occupied cells.
    pub fn ship_cell_count(&self) -> usize {
        self.ship.count_ones()
    }
}
