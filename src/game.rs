//! Turn orchestration: phases, firing, ability arming, win detection,
//! and the tactical log.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::ability::{self, AbilityBank, AbilityKind, AbilityOverview};
use crate::advisor::{resolve_advice, Difficulty, MoveSource};
use crate::board::Board;
use crate::common::{BoardError, Coord, Side};
use crate::config::ShipKind;
use crate::grid::CellMatrix;
use crate::ship::Orientation;

/// Lines of recent tactical log handed to the opponent move source.
const ADVISOR_LOG_WINDOW: usize = 5;

/// Game lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Setup,
    Placement,
    PlayerTurn,
    OpponentTurn,
    GameOver,
}

/// Per-ship status line for UI snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct ShipStatus {
    pub kind: ShipKind,
    pub hits: usize,
    pub sunk: bool,
    /// Occupied cells; withheld for unsunk enemy ships.
    pub coords: Vec<Coord>,
}

/// Full render-ready view of the game, serializable for any frontend.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub player_grid: CellMatrix,
    pub opponent_grid: CellMatrix,
    pub player_ships: Vec<ShipStatus>,
    pub opponent_ships: Vec<ShipStatus>,
    pub abilities: AbilityOverview,
    pub phase: Phase,
    pub winner: Option<Side>,
    pub log: Vec<String>,
}

/// The single-player game engine. Owns both boards, the player's
/// ability bank, the phase machine, and the tactical log.
pub struct GameEngine {
    player: Board,
    opponent: Board,
    abilities: AbilityBank,
    difficulty: Difficulty,
    phase: Phase,
    winner: Option<Side>,
    log: Vec<String>,
    processing: bool,
    rng: SmallRng,
}

impl GameEngine {
    /// New game seeded from the thread RNG.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, SmallRng::from_rng(&mut rand::rng()))
    }

    /// New game with a fixed seed, for replayable runs and tests.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, rng: SmallRng) -> Self {
        GameEngine {
            player: Board::new(),
            opponent: Board::new(),
            abilities: AbilityBank::new(),
            difficulty,
            phase: Phase::Setup,
            winner: None,
            log: vec!["Tactical command online. Fleet abilities synchronized.".to_string()],
            processing: false,
            rng,
        }
    }

    /// Discards all state and starts a fresh game at `difficulty`.
    pub fn reset(&mut self, difficulty: Difficulty) {
        *self = Self::with_rng(difficulty, SmallRng::from_rng(&mut rand::rng()));
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn player_board(&self) -> &Board {
        &self.player
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent
    }

    /// Moves from Setup into Placement. No-op in any other phase.
    pub fn begin_placement(&mut self) {
        if self.phase == Phase::Setup {
            log::debug!("phase: Setup -> Placement");
            self.phase = Phase::Placement;
        }
    }

    /// Places one player ship during the Placement phase. When the
    /// fleet is complete, the opponent fleet deploys and the first
    /// player turn begins.
    pub fn place_ship(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if self.phase != Phase::Placement {
            return Err(BoardError::OutOfPhase);
        }
        self.player.place(index, row, col, orientation)?;
        let ship = self.player.ships()[index].ok_or(BoardError::InvalidShipIndex)?;
        self.log
            .push(format!("{} deployed at {}.", ship.kind(), ship.origin()));
        if self.player.fully_placed() {
            self.opponent.auto_place(&mut self.rng)?;
            self.log
                .push("Enemy fleet detected on approach. Weapons free.".to_string());
            log::debug!("phase: Placement -> PlayerTurn");
            self.phase = Phase::PlayerTurn;
        }
        Ok(())
    }

    /// Auto-deploys the player fleet and starts the battle.
    pub fn auto_deploy(&mut self) -> Result<(), BoardError> {
        if self.phase == Phase::Setup {
            self.begin_placement();
        }
        if self.phase != Phase::Placement {
            return Err(BoardError::OutOfPhase);
        }
        self.player.auto_place(&mut self.rng)?;
        self.log.push("Fleet auto-deployed.".to_string());
        self.opponent.auto_place(&mut self.rng)?;
        self.log
            .push("Enemy fleet detected on approach. Weapons free.".to_string());
        log::debug!("phase: Placement -> PlayerTurn");
        self.phase = Phase::PlayerTurn;
        Ok(())
    }

    /// Arms, disarms, or switches a special weapon. Only legal on the
    /// player's turn while no shot is resolving.
    pub fn toggle_ability(&mut self, kind: AbilityKind) -> bool {
        if self.phase != Phase::PlayerTurn || self.processing {
            return false;
        }
        let toggled = self.abilities.toggle(kind, &self.player);
        if toggled {
            match self.abilities.armed() {
                Some(armed) => self.log.push(format!("{} armed.", armed.name())),
                None => self.log.push(format!("{} disarmed.", kind.name())),
            }
        }
        toggled
    }

    /// Fires the player's shot (with any armed ability) at (row, col).
    /// Returns `false` and leaves the game untouched when the shot is
    /// out of phase, out of bounds, or targets a revealed cell.
    pub fn fire(&mut self, row: usize, col: usize) -> bool {
        if self.phase != Phase::PlayerTurn || self.processing {
            return false;
        }
        let target = Coord::new(row, col);
        if !target.in_bounds() || self.opponent.grid().is_revealed(target) {
            return false;
        }
        self.processing = true;
        let armed = self.abilities.armed();
        let strike = ability::fire(
            armed,
            Side::Player,
            self.player,
            self.opponent,
            target,
            &mut self.rng,
        );
        self.player = strike.attacker;
        self.opponent = strike.defender;
        self.log
            .push(format!("Fire mission {}: [{}]", target, strike.outcome));
        self.log.extend(strike.events);
        if let Some(kind) = armed {
            self.abilities.consume(kind);
        }
        if self.opponent.all_sunk() {
            self.log
                .push("Enemy fleet annihilated. The sector is yours.".to_string());
            log::debug!("phase: PlayerTurn -> GameOver (player wins)");
            self.winner = Some(Side::Player);
            self.phase = Phase::GameOver;
        } else {
            self.phase = Phase::OpponentTurn;
        }
        self.processing = false;
        true
    }

    /// Runs the opponent's turn using `source` for target selection.
    /// Returns `false` when it is not the opponent's turn.
    pub async fn opponent_turn(&mut self, source: &mut dyn MoveSource) -> bool {
        if self.phase != Phase::OpponentTurn || self.processing {
            return false;
        }
        self.processing = true;
        let view = self.player.grid().hidden_view();
        let recent: Vec<String> = self
            .log
            .iter()
            .rev()
            .take(ADVISOR_LOG_WINDOW)
            .rev()
            .cloned()
            .collect();
        let advice = resolve_advice(
            source.request_move(&view, &recent).await,
            &view,
            &mut self.rng,
        );
        if self.difficulty == Difficulty::Hard {
            self.log
                .push(format!("Enemy admiral: \"{}\"", advice.message));
        }
        let target = advice.target();
        let strike = ability::fire(
            None,
            Side::Opponent,
            self.opponent,
            self.player,
            target,
            &mut self.rng,
        );
        self.opponent = strike.attacker;
        self.player = strike.defender;
        self.log
            .push(format!("Incoming fire at {}: [{}]", target, strike.outcome));
        self.log.extend(strike.events);
        if self.player.all_sunk() {
            self.log
                .push("Fleet lost. The enemy admiral claims the sector.".to_string());
            log::debug!("phase: OpponentTurn -> GameOver (opponent wins)");
            self.winner = Some(Side::Opponent);
            self.phase = Phase::GameOver;
        } else {
            self.phase = Phase::PlayerTurn;
        }
        self.processing = false;
        true
    }

    /// Render-ready snapshot: the opponent grid is the concealed view
    /// and unsunk enemy ships withhold their coordinates.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player_grid: self.player.grid().cells(),
            opponent_grid: self.opponent.grid().hidden_view(),
            player_ships: ship_statuses(&self.player, false),
            opponent_ships: ship_statuses(&self.opponent, true),
            abilities: self.abilities.overview(&self.player),
            phase: self.phase,
            winner: self.winner,
            log: self.log.clone(),
        }
    }
}

fn ship_statuses(board: &Board, conceal_unsunk: bool) -> Vec<ShipStatus> {
    board
        .ships()
        .iter()
        .flatten()
        .map(|ship| ShipStatus {
            kind: ship.kind(),
            hits: ship.hits(),
            sunk: ship.is_sunk(),
            coords: if conceal_unsunk && !ship.is_sunk() {
                Vec::new()
            } else {
                ship.coords().collect()
            },
        })
        .collect()
}
