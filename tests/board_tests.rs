use dreadnought::{
    Board, BoardError, CellState, Coord, Orientation, ShipKind, ShotOutcome, GRID_SIZE, NUM_SHIPS,
    TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

// Catalog slots: 0 Carrier, 1 Battleship, 2 Cruiser, 3 Submarine, 4 Destroyer.

fn placed_board() -> Board {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap(); // Carrier A0-E0
    board.place(1, 2, 0, Orientation::Horizontal).unwrap(); // Battleship A2-D2
    board.place(2, 4, 0, Orientation::Horizontal).unwrap(); // Cruiser A4-C4
    board.place(3, 6, 0, Orientation::Horizontal).unwrap(); // Submarine A6-C6
    board.place(4, 8, 0, Orientation::Horizontal).unwrap(); // Destroyer A8-B8
    board
}

#[test]
fn test_place_marks_cells_and_fills_slot() {
    let mut board = Board::new();
    board.place(2, 3, 4, Orientation::Vertical).unwrap();
    assert_eq!(board.grid().ship_cell_count(), 3);
    for r in 3..6 {
        assert_eq!(board.grid().cell(Coord::new(r, 4)), CellState::Ship);
    }
    assert!(board.ships()[2].is_some());
}

#[test]
fn test_place_rejects_out_of_bounds_run() {
    let mut board = Board::new();
    // Carrier is 5 long; starting at col 6 horizontally runs off the grid.
    assert_eq!(
        board.place(0, 0, 6, Orientation::Horizontal).unwrap_err(),
        BoardError::PlacementOutOfBounds
    );
    assert_eq!(board.grid().ship_cell_count(), 0);
}

#[test]
fn test_place_rejects_overlap_without_mutation() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place(1, 0, 2, Orientation::Vertical).unwrap_err(),
        BoardError::PlacementOverlap
    );
    assert_eq!(board.grid().ship_cell_count(), 5);
    assert!(board.ships()[1].is_none());
}

#[test]
fn test_place_rejects_duplicate_slot_and_bad_index() {
    let mut board = Board::new();
    board.place(4, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place(4, 5, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipAlreadyPlaced
    );
    assert_eq!(
        board.place(NUM_SHIPS, 5, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::InvalidShipIndex
    );
}

#[test]
fn test_miss_marks_water() {
    let mut rng = SmallRng::seed_from_u64(1);
    let board = placed_board();
    let target = Coord::new(9, 9);
    let (board, res) = board.resolve_shot(target, &mut rng).unwrap();
    assert_eq!(res.outcome, ShotOutcome::Miss);
    assert_eq!(board.grid().cell(target), CellState::Miss);
    assert!(res.counter_fire.is_none());
    assert!(!res.death_rattle);
}

#[test]
fn test_three_hits_sink_cruiser() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut board = placed_board();
    for col in 0..2 {
        let (next, res) = board.resolve_shot(Coord::new(4, col), &mut rng).unwrap();
        board = next;
        assert_eq!(res.outcome, ShotOutcome::Hit);
        assert_eq!(board.grid().cell(Coord::new(4, col)), CellState::Hit);
    }
    let (board, res) = board.resolve_shot(Coord::new(4, 2), &mut rng).unwrap();
    assert_eq!(res.outcome, ShotOutcome::Sunk(ShipKind::Cruiser));
    assert_eq!(res.sunk, Some(ShipKind::Cruiser));
    // All three cells flip to sunk.
    for col in 0..3 {
        assert_eq!(board.grid().cell(Coord::new(4, col)), CellState::Sunk);
    }
    assert!(!board.is_alive(ShipKind::Cruiser));
}

#[test]
fn test_carrier_first_hit_reports_miss_then_reveals() {
    let mut rng = SmallRng::seed_from_u64(3);
    let board = placed_board();

    let first = Coord::new(0, 2);
    let (board, res) = board.resolve_shot(first, &mut rng).unwrap();
    assert_eq!(res.outcome, ShotOutcome::Miss);
    assert_eq!(board.grid().cell(first), CellState::Miss);
    let carrier = board.ships()[0].unwrap();
    assert_eq!(carrier.hits(), 1);
    assert_eq!(carrier.concealed(), Some(first));

    // Second real hit reveals the parked one.
    let second = Coord::new(0, 4);
    let (board, res) = board.resolve_shot(second, &mut rng).unwrap();
    assert_eq!(res.outcome, ShotOutcome::Hit);
    assert_eq!(board.grid().cell(first), CellState::Hit);
    assert_eq!(board.grid().cell(second), CellState::Hit);
    assert_eq!(board.ships()[0].unwrap().hits(), 2);
    assert!(board.ships()[0].unwrap().concealed().is_none());
    assert!(res.events.iter().any(|e| e.contains("revealed")));
}

#[test]
fn test_concealed_carrier_cell_rejects_repeat_shot() {
    let mut rng = SmallRng::seed_from_u64(4);
    let board = placed_board();
    let first = Coord::new(0, 2);
    let (board, _) = board.resolve_shot(first, &mut rng).unwrap();
    // Displayed as a miss, but still revealed: firing again is an error.
    assert_eq!(
        board.resolve_shot(first, &mut rng).unwrap_err(),
        BoardError::AlreadyRevealed
    );
}

#[test]
fn test_battleship_requests_counter_fire_per_real_hit() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut board = placed_board();
    for col in 0..3 {
        let (next, res) = board.resolve_shot(Coord::new(2, col), &mut rng).unwrap();
        board = next;
        let back = res.counter_fire.unwrap();
        assert!(back.in_bounds());
    }
    // Sinking hit still counter-fires.
    let (_, res) = board.resolve_shot(Coord::new(2, 3), &mut rng).unwrap();
    assert_eq!(res.sunk, Some(ShipKind::Battleship));
    assert!(res.counter_fire.is_some());
}

#[test]
fn test_non_battleship_hits_never_counter_fire() {
    let mut rng = SmallRng::seed_from_u64(6);
    let board = placed_board();
    let (_, res) = board.resolve_shot(Coord::new(8, 0), &mut rng).unwrap();
    assert_eq!(res.outcome, ShotOutcome::Hit);
    assert!(res.counter_fire.is_none());
}

#[test]
fn test_submarine_sink_raises_death_rattle() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut board = placed_board();
    for col in 0..2 {
        let (next, res) = board.resolve_shot(Coord::new(6, col), &mut rng).unwrap();
        board = next;
        assert!(!res.death_rattle);
    }
    let (_, res) = board.resolve_shot(Coord::new(6, 2), &mut rng).unwrap();
    assert_eq!(res.sunk, Some(ShipKind::Submarine));
    assert!(res.death_rattle);
}

#[test]
fn test_death_rattle_target_is_hidden_ship_cell() {
    let mut rng = SmallRng::seed_from_u64(8);
    let board = placed_board();
    for _ in 0..20 {
        let target = board.death_rattle_target(&mut rng).unwrap();
        assert!(board.grid().has_ship(target));
        assert!(!board.grid().is_revealed(target));
    }
}

#[test]
fn test_death_rattle_target_none_when_fleet_exposed() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut board = Board::new();
    board.place(4, 0, 0, Orientation::Horizontal).unwrap();
    let (board, _) = board.resolve_shot(Coord::new(0, 0), &mut rng).unwrap();
    let (board, _) = board.resolve_shot(Coord::new(0, 1), &mut rng).unwrap();
    assert!(board.death_rattle_target(&mut rng).is_none());
}

#[test]
fn test_resolve_shot_out_of_bounds() {
    let mut rng = SmallRng::seed_from_u64(10);
    let board = placed_board();
    assert!(matches!(
        board.resolve_shot(Coord::new(0, GRID_SIZE), &mut rng).unwrap_err(),
        BoardError::OutOfBounds { .. }
    ));
}

#[test]
fn test_resolve_shot_rejects_revealed_cells() {
    let mut rng = SmallRng::seed_from_u64(11);
    let board = placed_board();
    let miss = Coord::new(9, 9);
    let (board, _) = board.resolve_shot(miss, &mut rng).unwrap();
    assert_eq!(
        board.resolve_shot(miss, &mut rng).unwrap_err(),
        BoardError::AlreadyRevealed
    );
    let hit = Coord::new(8, 0);
    let (board, _) = board.resolve_shot(hit, &mut rng).unwrap();
    assert_eq!(
        board.resolve_shot(hit, &mut rng).unwrap_err(),
        BoardError::AlreadyRevealed
    );
}

#[test]
fn test_auto_place_fills_fleet_without_overlap() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut board = Board::new();
    board.auto_place(&mut rng).unwrap();
    assert!(board.fully_placed());
    // Disjoint runs: occupied cell count equals the catalog total.
    assert_eq!(board.grid().ship_cell_count(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_auto_place_keeps_manual_placements() {
    let mut rng = SmallRng::seed_from_u64(43);
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.auto_place(&mut rng).unwrap();
    assert!(board.fully_placed());
    let carrier = board.ships()[0].unwrap();
    assert_eq!(carrier.origin(), Coord::new(0, 0));
    assert_eq!(board.grid().ship_cell_count(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_hidden_view_disguises_ships() {
    let board = placed_board();
    let view = board.grid().hidden_view();
    for row in view.iter() {
        for cell in row.iter() {
            assert_ne!(*cell, CellState::Ship);
        }
    }
}
