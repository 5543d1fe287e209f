//! Ship instances: placement geometry, damage, and special-state tracking.

use serde::{Deserialize, Serialize};

use crate::common::{BoardError, Coord};
use crate::config::{ShipKind, GRID_SIZE};

/// Orientation of a ship run on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One deployed ship: class, placement run, cumulative damage, and the
/// Carrier's phantom-hull slot (the coordinate of a hit still displayed
/// as a miss).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipInstance {
    kind: ShipKind,
    origin: Coord,
    orientation: Orientation,
    hits: usize,
    sunk: bool,
    concealed: Option<Coord>,
}

impl ShipInstance {
    /// Builds a ship at `origin` with `orientation`, rejecting runs that
    /// leave the grid. Overlap against other ships is the board's job.
    pub fn new(kind: ShipKind, origin: Coord, orientation: Orientation) -> Result<Self, BoardError> {
        let len = kind.length();
        let fits = match orientation {
            Orientation::Horizontal => origin.col + len <= GRID_SIZE,
            Orientation::Vertical => origin.row + len <= GRID_SIZE,
        };
        if !origin.in_bounds() || !fits {
            return Err(BoardError::PlacementOutOfBounds);
        }
        Ok(ShipInstance {
            kind,
            origin,
            orientation,
            hits: 0,
            sunk: false,
            concealed: None,
        })
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Occupied coordinates in placement order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let Coord { row, col } = self.origin;
        let orientation = self.orientation;
        (0..self.kind.length()).map(move |i| match orientation {
            Orientation::Horizontal => Coord::new(row, col + i),
            Orientation::Vertical => Coord::new(row + i, col),
        })
    }

    pub fn occupies(&self, target: Coord) -> bool {
        let len = self.kind.length();
        match self.orientation {
            Orientation::Horizontal => {
                target.row == self.origin.row
                    && target.col >= self.origin.col
                    && target.col < self.origin.col + len
            }
            Orientation::Vertical => {
                target.col == self.origin.col
                    && target.row >= self.origin.row
                    && target.row < self.origin.row + len
            }
        }
    }

    /// Records one hit. Returns `true` when this hit sinks the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        debug_assert!(self.hits < self.kind.length());
        self.hits += 1;
        if self.hits == self.kind.length() {
            self.sunk = true;
        }
        self.sunk
    }

    /// Forces the ship to full damage, bypassing per-hit increments.
    pub(crate) fn force_sink(&mut self) {
        self.hits = self.kind.length();
        self.sunk = true;
        self.concealed = None;
    }

    pub(crate) fn conceal(&mut self, at: Coord) {
        self.concealed = Some(at);
    }

    /// Takes the concealed-hit coordinate, clearing the slot.
    pub(crate) fn take_concealed(&mut self) -> Option<Coord> {
        self.concealed.take()
    }

    pub fn concealed(&self) -> Option<Coord> {
        self.concealed
    }
}
