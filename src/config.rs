//! Fleet catalog and board constants.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Side length of the square grid.
pub const GRID_SIZE: usize = 10;

/// Number of ships in the fleet catalog.
pub const NUM_SHIPS: usize = 5;

/// Total occupied cells of a fully placed fleet.
pub const TOTAL_SHIP_CELLS: usize = 17;

/// Random placement attempts before falling back to a full-grid scan.
pub const PLACEMENT_RETRY_CAP: usize = 100;

/// The closed set of ship classes. Ability branching pattern-matches on
/// this enum rather than comparing display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    /// Display color tag consumed by the rendering layer.
    pub const fn color(self) -> &'static str {
        match self {
            ShipKind::Carrier => "yellow",
            ShipKind::Battleship => "orange",
            ShipKind::Cruiser => "cyan",
            ShipKind::Submarine => "purple",
            ShipKind::Destroyer => "rose",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fleet roster in placement order. Board slots are indexed by position
/// in this catalog.
pub const CATALOG: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];
