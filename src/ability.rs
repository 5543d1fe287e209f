//! One-shot fleet abilities and the strike engine that applies them.
//!
//! `fire` is the single entry point for resolving a turn's attack,
//! armed or not. It takes attacker and defender board snapshots and
//! returns the successors plus the tactical-log lines the strike
//! produced. Secondary effects (Battleship counter fire, Submarine
//! death rattles) are applied here, one level deep: a secondary shot
//! never spawns further secondaries.

use rand::rngs::SmallRng;
use serde::Serialize;

use crate::board::Board;
use crate::common::{Coord, ShotOutcome, Side};
use crate::config::ShipKind;

/// Cross pattern fired by the Pulse Cannon: center, right, left, down,
/// up. Sub-shots resolve in this order.
pub const PULSE_OFFSETS: [(isize, isize); 5] = [(0, 0), (0, 1), (0, -1), (1, 0), (-1, 0)];

/// The two armable special weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbilityKind {
    Obliterator,
    PulseCannon,
}

impl AbilityKind {
    /// The ship whose survival keeps this ability available.
    pub const fn linked_ship(self) -> ShipKind {
        match self {
            AbilityKind::Obliterator => ShipKind::Destroyer,
            AbilityKind::PulseCannon => ShipKind::Cruiser,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AbilityKind::Obliterator => "Obliterator",
            AbilityKind::PulseCannon => "Pulse Cannon",
        }
    }
}

/// UI-facing availability of one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityState {
    pub available: bool,
    pub active: bool,
    pub used: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityOverview {
    pub obliterator: AbilityState,
    pub pulse_cannon: AbilityState,
}

/// Per-game ability book-keeping: which weapon is armed (at most one)
/// and which have been spent. Spent is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbilityBank {
    armed: Option<AbilityKind>,
    obliterator_used: bool,
    pulse_used: bool,
}

impl AbilityBank {
    pub fn new() -> Self {
        AbilityBank::default()
    }

    pub fn armed(&self) -> Option<AbilityKind> {
        self.armed
    }

    pub fn is_used(&self, kind: AbilityKind) -> bool {
        match kind {
            AbilityKind::Obliterator => self.obliterator_used,
            AbilityKind::PulseCannon => self.pulse_used,
        }
    }

    /// Toggles `kind`: arming it, disarming it if already armed, or
    /// switching away from the other weapon. Rejected (returns `false`)
    /// when the ability is spent or its linked ship is sunk.
    pub fn toggle(&mut self, kind: AbilityKind, owner: &Board) -> bool {
        if self.is_used(kind) || !owner.is_alive(kind.linked_ship()) {
            return false;
        }
        self.armed = if self.armed == Some(kind) {
            None
        } else {
            Some(kind)
        };
        true
    }

    /// Marks `kind` spent and disarms.
    pub(crate) fn consume(&mut self, kind: AbilityKind) {
        match kind {
            AbilityKind::Obliterator => self.obliterator_used = true,
            AbilityKind::PulseCannon => self.pulse_used = true,
        }
        self.armed = None;
    }

    pub fn overview(&self, owner: &Board) -> AbilityOverview {
        let state = |kind: AbilityKind| AbilityState {
            available: !self.is_used(kind) && owner.is_alive(kind.linked_ship()),
            active: self.armed == Some(kind),
            used: self.is_used(kind),
        };
        AbilityOverview {
            obliterator: state(AbilityKind::Obliterator),
            pulse_cannon: state(AbilityKind::PulseCannon),
        }
    }
}

/// Everything a resolved strike changed: successor boards for both
/// sides, the outcome reported to the attacker, and log lines.
#[derive(Debug, Clone)]
pub struct Strike {
    pub attacker: Board,
    pub defender: Board,
    pub outcome: ShotOutcome,
    pub events: Vec<String>,
}

/// Resolves one full strike, including any armed ability and all
/// secondary effects, against snapshot boards.
///
/// The caller guarantees `target` is in bounds and unrevealed on the
/// defender's board for the normal and pulse paths; the obliterator
/// path accepts any in-bounds cell.
pub fn fire(
    armed: Option<AbilityKind>,
    side: Side,
    attacker: Board,
    defender: Board,
    target: Coord,
    rng: &mut SmallRng,
) -> Strike {
    match armed {
        None => fire_normal(side, attacker, defender, target, rng),
        Some(AbilityKind::Obliterator) => fire_obliterator(side, attacker, defender, target, rng),
        Some(AbilityKind::PulseCannon) => fire_pulse(side, attacker, defender, target, rng),
    }
}

fn sink_announcement(side: Side, kind: ShipKind) -> String {
    match side {
        Side::Player => format!("Victory intel: enemy {} neutralized.", kind),
        Side::Opponent => format!("Critical alert: friendly {} lost.", kind),
    }
}

fn fire_normal(
    side: Side,
    mut attacker: Board,
    defender: Board,
    target: Coord,
    rng: &mut SmallRng,
) -> Strike {
    let mut events = Vec::new();
    let (mut defender, res) = match defender.resolve_shot(target, rng) {
        Ok(out) => out,
        // Guarded by the caller; treat a slipped-through duplicate as a
        // no-op rather than corrupting the boards.
        Err(_) => {
            return Strike {
                attacker,
                defender,
                outcome: ShotOutcome::Miss,
                events,
            }
        }
    };
    events.extend(res.events);
    if let Some(kind) = res.sunk {
        events.push(sink_announcement(side, kind));
    }
    if res.death_rattle {
        defender = apply_death_rattle(defender, rng, &mut events);
    }
    if let Some(back) = res.counter_fire {
        events.push(format!("Battleship counter-battery fire inbound at {}!", back));
        attacker = apply_secondary(attacker, back, rng, &mut events);
    }
    Strike {
        attacker,
        defender,
        outcome: res.outcome,
        events,
    }
}

fn fire_obliterator(
    side: Side,
    attacker: Board,
    mut defender: Board,
    target: Coord,
    rng: &mut SmallRng,
) -> Strike {
    let mut events = Vec::new();
    match defender.ship_index_at(target) {
        Some(idx) => {
            // force_sink only returns None for an empty slot, which
            // ship_index_at has already ruled out.
            let kind = match defender.force_sink(idx) {
                Some(kind) => kind,
                None => {
                    return Strike {
                        attacker,
                        defender,
                        outcome: ShotOutcome::Miss,
                        events,
                    }
                }
            };
            events.push(format!(
                "Obliterator impact at {}: {} destroyed outright.",
                target, kind
            ));
            events.push(sink_announcement(side, kind));
            let mut strike = Strike {
                attacker,
                defender,
                outcome: ShotOutcome::Sunk(kind),
                events,
            };
            if kind == ShipKind::Submarine {
                strike.defender = apply_death_rattle(strike.defender, rng, &mut strike.events);
            }
            strike
        }
        None => {
            if !defender.grid().is_revealed(target) {
                defender.mark_miss(target);
            }
            events.push(format!("Obliterator miss: impact at {} in open water.", target));
            Strike {
                attacker,
                defender,
                outcome: ShotOutcome::Miss,
                events,
            }
        }
    }
}

fn fire_pulse(
    side: Side,
    mut attacker: Board,
    mut defender: Board,
    target: Coord,
    rng: &mut SmallRng,
) -> Strike {
    let mut events = vec![format!("Pulse Cannon discharge centered on {}.", target)];
    // The center cell's outcome is what the strike reports overall.
    let mut outcome = ShotOutcome::Miss;
    for (i, (dr, dc)) in PULSE_OFFSETS.iter().enumerate() {
        let Some(cell) = target.offset(*dr, *dc) else {
            continue;
        };
        // Sub-cells already revealed (or clipped) are skipped quietly.
        let (next, res) = match defender.resolve_shot(cell, rng) {
            Ok(out) => out,
            Err(_) => continue,
        };
        defender = next;
        events.extend(res.events);
        if i == 0 {
            outcome = res.outcome;
        }
        if let Some(kind) = res.sunk {
            events.push(format!("Pulse kill at {}: {} confirmed sunk.", cell, kind));
            events.push(sink_announcement(side, kind));
        }
        if res.death_rattle {
            defender = apply_death_rattle(defender, rng, &mut events);
        }
        if let Some(back) = res.counter_fire {
            events.push(format!("Battleship counter-battery fire inbound at {}!", back));
            attacker = apply_secondary(attacker, back, rng, &mut events);
        }
    }
    Strike {
        attacker,
        defender,
        outcome,
        events,
    }
}

/// Applies one secondary shot, dropping any further requests it raises.
/// A secondary landing on an already-revealed cell is dropped outright.
fn apply_secondary(
    board: Board,
    target: Coord,
    rng: &mut SmallRng,
    events: &mut Vec<String>,
) -> Board {
    match board.resolve_shot(target, rng) {
        Ok((next, res)) => {
            events.extend(res.events);
            match res.outcome {
                ShotOutcome::Miss => events.push(format!("Splash at {}: no damage.", target)),
                ShotOutcome::Hit => events.push(format!("Impact at {}: hull breach!", target)),
                ShotOutcome::Sunk(kind) => {
                    events.push(format!("Impact at {}: {} sunk!", target, kind))
                }
            }
            next
        }
        Err(_) => board,
    }
}

/// Fires the Submarine's dying shot against its own fleet.
fn apply_death_rattle(defender: Board, rng: &mut SmallRng, events: &mut Vec<String>) -> Board {
    let Some(target) = defender.death_rattle_target(rng) else {
        events.push("Submarine death rattle fizzles: no hull left to strike.".to_string());
        return defender;
    };
    events.push(format!(
        "Submarine death rattle! A final torpedo tears into its own fleet at {}.",
        target
    ));
    apply_secondary(defender, target, rng, events)
}
