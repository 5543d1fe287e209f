//! Shared small types: coordinates, sides, shot outcomes, board errors.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::config::{ShipKind, GRID_SIZE};
use crate::mask::MaskError;

/// A grid coordinate. Displays in the tactical-log convention of
/// column letter plus row number (`C4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// The coordinate offset by (row, col) deltas, or `None` off-grid.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let c = Coord { row, col };
        c.in_bounds().then_some(c)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row)
    }
}

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Outcome of a resolved shot, as reported to the attacker. A concealed
/// Carrier hit reports `Miss` even though damage was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit,
    Sunk(ShipKind),
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Miss => write!(f, "MISS"),
            ShotOutcome::Hit => write!(f, "HIT"),
            ShotOutcome::Sunk(_) => write!(f, "SUNK"),
        }
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying mask error (invalid index).
    Mask(MaskError),
    /// Target coordinate is outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// The placement run leaves the grid.
    PlacementOutOfBounds,
    /// The placement run crosses another ship.
    PlacementOverlap,
    /// That catalog slot already holds a placed ship.
    ShipAlreadyPlaced,
    /// Catalog index outside the fleet roster.
    InvalidShipIndex,
    /// Random and scan placement both failed to fit the ship.
    UnableToPlaceShip,
    /// The target cell is already hit, missed, or sunk.
    AlreadyRevealed,
    /// The occupancy mask claims a ship but no instance owns the cell.
    UnknownShipHit,
    /// The operation is not valid in the current game phase.
    OutOfPhase,
}

impl From<MaskError> for BoardError {
    fn from(err: MaskError) -> Self {
        BoardError::Mask(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Mask(e) => write!(f, "mask error: {}", e),
            BoardError::OutOfBounds { row, col } => {
                write!(f, "target out of bounds: row={}, col={}", row, col)
            }
            BoardError::PlacementOutOfBounds => write!(f, "ship placement leaves the grid"),
            BoardError::PlacementOverlap => write!(f, "ship placement overlaps another ship"),
            BoardError::ShipAlreadyPlaced => write!(f, "ship is already placed on the board"),
            BoardError::InvalidShipIndex => write!(f, "ship index outside the fleet roster"),
            BoardError::UnableToPlaceShip => write!(f, "unable to place ship"),
            BoardError::AlreadyRevealed => write!(f, "cell is already revealed"),
            BoardError::UnknownShipHit => write!(f, "occupied cell has no owning ship"),
            BoardError::OutOfPhase => write!(f, "operation not valid in the current phase"),
        }
    }
}

impl std::error::Error for BoardError {}
