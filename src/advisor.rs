//! Opponent move sources: where the enemy's shots come from.
//!
//! The engine talks to a [`MoveSource`] trait object and never cares
//! whether moves come from a local RNG or a remote advisory service.
//! Every advised move passes validation against the hidden view of the
//! player's board; anything malformed, out of range, already tried, or
//! late degrades to a uniformly random untried cell. The enemy never
//! skips a turn.

use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::Coord;
use crate::config::GRID_SIZE;
use crate::grid::{CellMatrix, CellState};

/// Opponent difficulty tier. Only `Hard` surfaces advisory taunts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Taunt shown when the advisory channel failed and a fallback move was
/// substituted.
pub const FALLBACK_TAUNT: &str = "Static interference... but I am still coming for you.";

/// Routine message attached to locally generated moves.
pub const ROUTINE_MESSAGE: &str = "Preparing salvos.";

/// One opponent move: a target cell plus a short in-character message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisedMove {
    pub row: usize,
    pub col: usize,
    pub message: String,
}

impl AdvisedMove {
    pub fn target(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Parses an advisory payload. The payload is exactly the wire
    /// object: `{"row": 3, "col": 4, "message": "..."}`.
    pub fn from_json(payload: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Asynchronous producer of opponent moves.
///
/// `view` is the hidden view of the player's board (unstruck ships
/// disguised as water); `recent_log` carries the last few tactical-log
/// lines for advisory flavor.
#[async_trait]
pub trait MoveSource: Send {
    async fn request_move(
        &mut self,
        view: &CellMatrix,
        recent_log: &[String],
    ) -> anyhow::Result<AdvisedMove>;
}

/// Cells not yet fired upon: empty water or disguised ship cells.
pub fn untried_cells(view: &CellMatrix) -> Vec<Coord> {
    let mut out = Vec::new();
    for (r, row) in view.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if matches!(cell, CellState::Empty | CellState::Ship) {
                out.push(Coord::new(r, c));
            }
        }
    }
    out
}

/// True iff the move targets an in-range untried cell and carries a
/// non-empty message.
pub fn validate(mv: &AdvisedMove, view: &CellMatrix) -> bool {
    mv.row < GRID_SIZE
        && mv.col < GRID_SIZE
        && !mv.message.trim().is_empty()
        && matches!(view[mv.row][mv.col], CellState::Empty | CellState::Ship)
}

/// A uniformly random untried cell with the fallback taunt attached.
pub fn fallback_move(view: &CellMatrix, rng: &mut SmallRng) -> AdvisedMove {
    let cells = untried_cells(view);
    // The engine ends the game before the grid is exhausted, but a
    // saturated view still yields a deterministic cell rather than a panic.
    let target = if cells.is_empty() {
        Coord::new(0, 0)
    } else {
        cells[rng.random_range(0..cells.len())]
    };
    AdvisedMove {
        row: target.row,
        col: target.col,
        message: FALLBACK_TAUNT.to_string(),
    }
}

/// Collapses an advisory result to a guaranteed-valid move, degrading
/// failures and invalid advice to the random fallback.
pub fn resolve_advice(
    result: anyhow::Result<AdvisedMove>,
    view: &CellMatrix,
    rng: &mut SmallRng,
) -> AdvisedMove {
    match result {
        Ok(mv) if validate(&mv, view) => mv,
        Ok(mv) => {
            log::warn!(
                "advisory move rejected (row={}, col={}); substituting fallback",
                mv.row,
                mv.col
            );
            fallback_move(view, rng)
        }
        Err(err) => {
            log::warn!("advisory request failed: {err:#}; substituting fallback");
            fallback_move(view, rng)
        }
    }
}

/// Local move source: uniform random fire over untried cells.
pub struct RandomMoveSource {
    rng: SmallRng,
}

impl RandomMoveSource {
    pub fn new() -> Self {
        RandomMoveSource {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomMoveSource {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMoveSource {
    fn default() -> Self {
        RandomMoveSource::new()
    }
}

#[async_trait]
impl MoveSource for RandomMoveSource {
    async fn request_move(
        &mut self,
        view: &CellMatrix,
        _recent_log: &[String],
    ) -> anyhow::Result<AdvisedMove> {
        let mut mv = fallback_move(view, &mut self.rng);
        mv.message = ROUTINE_MESSAGE.to_string();
        Ok(mv)
    }
}

/// Wraps another source with a deadline and validation. Timeouts,
/// transport errors, and invalid advice all degrade to the fallback, so
/// the wrapped source can never stall or derail a turn.
pub struct AdvisedSource<S: MoveSource> {
    inner: S,
    timeout: Duration,
    rng: SmallRng,
}

impl<S: MoveSource> AdvisedSource<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        AdvisedSource {
            inner,
            timeout,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(inner: S, timeout: Duration, seed: u64) -> Self {
        AdvisedSource {
            inner,
            timeout,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl<S: MoveSource> MoveSource for AdvisedSource<S> {
    async fn request_move(
        &mut self,
        view: &CellMatrix,
        recent_log: &[String],
    ) -> anyhow::Result<AdvisedMove> {
        let result = match tokio::time::timeout(
            self.timeout,
            self.inner.request_move(view, recent_log),
        )
        .await
        {
            Ok(inner) => inner,
            Err(_) => Err(anyhow::anyhow!(
                "advisory request timed out after {:?}",
                self.timeout
            )),
        };
        Ok(resolve_advice(result, view, &mut self.rng))
    }
}
