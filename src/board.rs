//! One side's board: grid surface plus fleet roster, and the shot
//! resolver at the heart of turn resolution.
//!
//! A `Board` is a cheap `Copy` snapshot. `resolve_shot` consumes a
//! snapshot and returns the successor, so cascading effects (counter
//! fire, death rattles) thread explicit board values instead of
//! mutating shared state mid-cascade.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::{BoardError, Coord, ShotOutcome};
use crate::config::{ShipKind, CATALOG, GRID_SIZE, NUM_SHIPS, PLACEMENT_RETRY_CAP};
use crate::grid::Grid;
use crate::ship::{Orientation, ShipInstance};

/// Result of one resolved shot. Counter fire and death rattles are
/// emitted as requests; the caller decides whether and where they land.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Outcome as reported to the attacker.
    pub outcome: ShotOutcome,
    /// Ship sunk by this shot, if any.
    pub sunk: Option<ShipKind>,
    /// Battleship counter-battery request: a random coordinate to be
    /// resolved against the attacker's own board.
    pub counter_fire: Option<Coord>,
    /// Set when the sunk ship was a Submarine; the defending fleet owes
    /// its dying crew one more shot.
    pub death_rattle: bool,
    /// Human-readable log lines produced during resolution.
    pub events: Vec<String>,
}

impl Resolution {
    fn miss() -> Self {
        Resolution {
            outcome: ShotOutcome::Miss,
            sunk: None,
            counter_fire: None,
            death_rattle: false,
            events: Vec::new(),
        }
    }
}

/// Grid plus fleet for one side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Board {
    grid: Grid,
    ships: [Option<ShipInstance>; NUM_SHIPS],
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Fleet slots in catalog order; `None` until that ship is placed.
    pub fn ships(&self) -> &[Option<ShipInstance>; NUM_SHIPS] {
        &self.ships
    }

    /// True iff the catalog ship at `index` fits at (row, col).
    pub fn can_place(&self, index: usize, row: usize, col: usize, orientation: Orientation) -> bool {
        index < NUM_SHIPS
            && self.ships[index].is_none()
            && self
                .grid
                .can_place(row, col, CATALOG[index].length(), orientation)
    }

    /// Places the catalog ship at `index`. Rejected placements leave the
    /// board untouched.
    pub fn place(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if index >= NUM_SHIPS {
            return Err(BoardError::InvalidShipIndex);
        }
        if self.ships[index].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let ship = ShipInstance::new(CATALOG[index], Coord::new(row, col), orientation)?;
        for c in ship.coords() {
            if self.grid.has_ship(c) {
                return Err(BoardError::PlacementOverlap);
            }
        }
        self.grid.mark_ship_run(&ship);
        self.ships[index] = Some(ship);
        Ok(())
    }

    /// Places every remaining catalog ship at random. Bounded sampling
    /// with a deterministic first-fit scan once the retry cap is spent,
    /// so this always terminates.
    pub fn auto_place(&mut self, rng: &mut SmallRng) -> Result<(), BoardError> {
        for index in 0..NUM_SHIPS {
            if self.ships[index].is_some() {
                continue;
            }
            self.place_randomly(index, rng)?;
        }
        Ok(())
    }

    fn place_randomly(&mut self, index: usize, rng: &mut SmallRng) -> Result<(), BoardError> {
        let length = CATALOG[index].length();
        for _ in 0..PLACEMENT_RETRY_CAP {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let row = rng.random_range(0..GRID_SIZE);
            let col = rng.random_range(0..GRID_SIZE);
            if self.grid.can_place(row, col, length, orientation) {
                return self.place(index, row, col, orientation);
            }
        }
        // Retry cap spent; scan for the first fitting slot.
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    if self.grid.can_place(row, col, length, orientation) {
                        return self.place(index, row, col, orientation);
                    }
                }
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Index of the ship occupying `target`, if any.
    pub fn ship_index_at(&self, target: Coord) -> Option<usize> {
        self.ships
            .iter()
            .position(|slot| slot.is_some_and(|ship| ship.occupies(target)))
    }

    /// True when every catalog ship is placed.
    pub fn fully_placed(&self) -> bool {
        self.ships.iter().all(Option::is_some)
    }

    /// True when every catalog ship is placed and sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships
            .iter()
            .all(|slot| slot.is_some_and(|ship| ship.is_sunk()))
    }

    /// True when a ship of `kind` is placed and afloat.
    pub fn is_alive(&self, kind: ShipKind) -> bool {
        self.ships
            .iter()
            .flatten()
            .any(|ship| ship.kind() == kind && !ship.is_sunk())
    }

    /// Resolves a single shot against this board, returning the
    /// successor board and what happened.
    ///
    /// An already-revealed target is a precondition failure: the board
    /// is returned untouched inside the error path and the caller is
    /// expected to drop the shot silently.
    pub fn resolve_shot(
        mut self,
        target: Coord,
        rng: &mut SmallRng,
    ) -> Result<(Self, Resolution), BoardError> {
        if !target.in_bounds() {
            return Err(BoardError::OutOfBounds {
                row: target.row,
                col: target.col,
            });
        }
        if self.grid.is_revealed(target) {
            return Err(BoardError::AlreadyRevealed);
        }
        if !self.grid.has_ship(target) {
            self.grid.mark_miss(target);
            return Ok((self, Resolution::miss()));
        }

        let idx = self.ship_index_at(target).ok_or(BoardError::UnknownShipHit)?;
        let mut ship = self.ships[idx].ok_or(BoardError::UnknownShipHit)?;
        let mut events = Vec::new();

        // Carrier phantom hull: the very first hit is recorded on the
        // ship but the grid and the reported outcome both claim a miss.
        if ship.kind() == ShipKind::Carrier && ship.hits() == 0 {
            ship.register_hit();
            ship.conceal(target);
            self.grid.mark_miss(target);
            self.ships[idx] = Some(ship);
            events.push("Carrier phantom hull engaged. Attacker sensors report a miss.".to_string());
            return Ok((
                self,
                Resolution {
                    outcome: ShotOutcome::Miss,
                    sunk: None,
                    counter_fire: None,
                    death_rattle: false,
                    events,
                },
            ));
        }

        let now_sunk = ship.register_hit();
        self.grid.mark_hit(target);

        if let Some(hidden) = ship.take_concealed() {
            self.grid.reveal_concealed(hidden);
            events.push(format!(
                "Phantom hull compromised! Earlier hit at {} revealed.",
                hidden
            ));
        }

        let counter_fire = (ship.kind() == ShipKind::Battleship).then(|| {
            Coord::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE))
        });

        let mut sunk = None;
        let mut death_rattle = false;
        if now_sunk {
            for c in ship.coords() {
                self.grid.mark_sunk(c);
            }
            sunk = Some(ship.kind());
            death_rattle = ship.kind() == ShipKind::Submarine;
        }
        self.ships[idx] = Some(ship);

        let outcome = match sunk {
            Some(kind) => ShotOutcome::Sunk(kind),
            None => ShotOutcome::Hit,
        };
        Ok((
            self,
            Resolution {
                outcome,
                sunk,
                counter_fire,
                death_rattle,
                events,
            },
        ))
    }

    /// Destroys the ship at `index` outright: full damage, every cell
    /// marked sunk, any phantom-hull concealment dropped.
    pub(crate) fn force_sink(&mut self, index: usize) -> Option<ShipKind> {
        let mut ship = self.ships[index]?;
        ship.force_sink();
        for c in ship.coords() {
            self.grid.mark_sunk(c);
        }
        self.ships[index] = Some(ship);
        Some(ship.kind())
    }

    pub(crate) fn mark_miss(&mut self, c: Coord) {
        self.grid.mark_miss(c);
    }

    /// Picks a uniformly random death-rattle target on this board: an
    /// unstruck cell of an unsunk ship, or `None` when the whole fleet
    /// is already exposed.
    pub fn death_rattle_target(&self, rng: &mut SmallRng) -> Option<Coord> {
        let cells = self.grid.hidden_ship_cells();
        if cells.is_empty() {
            return None;
        }
        Some(cells[rng.random_range(0..cells.len())])
    }
}
