use dreadnought::{Board, BoardError, CellState, Coord, ShipKind, GRID_SIZE, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_fleet(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.auto_place(&mut rng).unwrap();
    board
}

fn check_damage_consistency(board: &Board) {
    for ship in board.ships().iter().flatten() {
        assert_eq!(ship.is_sunk(), ship.hits() == ship.kind().length());
        assert!(ship.hits() <= ship.kind().length());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Auto-placement always terminates with a full disjoint fleet.
    #[test]
    fn auto_place_always_fills_fleet(seed in any::<u64>()) {
        let board = random_fleet(seed);
        prop_assert!(board.fully_placed());
        prop_assert_eq!(board.grid().ship_cell_count(), TOTAL_SHIP_CELLS);
    }

    /// Under any shot sequence, per-ship damage stays consistent and
    /// revealed cells only grow.
    #[test]
    fn shot_sequences_keep_invariants(seed in any::<u64>(), shots in 1usize..120) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = random_fleet(seed);
        let mut revealed = board.grid().revealed_count();

        for _ in 0..shots {
            let target = Coord::new(
                rng.random_range(0..GRID_SIZE),
                rng.random_range(0..GRID_SIZE),
            );
            match board.resolve_shot(target, &mut rng) {
                Ok((next, _)) => {
                    board = next;
                    let now = board.grid().revealed_count();
                    prop_assert!(now > revealed);
                    revealed = now;
                }
                Err(err) => {
                    prop_assert_eq!(err, BoardError::AlreadyRevealed);
                }
            }
            check_damage_consistency(&board);
        }
    }

    /// A repeated shot always errors and leaves the board unchanged.
    #[test]
    fn duplicate_shots_never_mutate(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = random_fleet(seed);
        let target = Coord::new(
            rng.random_range(0..GRID_SIZE),
            rng.random_range(0..GRID_SIZE),
        );
        let (board, _) = board.resolve_shot(target, &mut rng).unwrap();
        let before = board;
        prop_assert_eq!(
            board.resolve_shot(target, &mut rng).unwrap_err(),
            BoardError::AlreadyRevealed
        );
        prop_assert_eq!(board, before);
    }

    /// The first Carrier hit always displays as a miss and never sinks;
    /// a later hit on another Carrier cell restores the hidden cell.
    #[test]
    fn carrier_conceals_exactly_one_hit(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = random_fleet(seed);
        let carrier = board.ships()[0].unwrap();
        prop_assert_eq!(carrier.kind(), ShipKind::Carrier);
        let cells: Vec<Coord> = carrier.coords().collect();

        let (board, res) = board.resolve_shot(cells[0], &mut rng).unwrap();
        prop_assert_eq!(board.grid().cell(cells[0]), CellState::Miss);
        prop_assert!(res.sunk.is_none());
        prop_assert_eq!(board.ships()[0].unwrap().hits(), 1);

        let (board, _) = board.resolve_shot(cells[1], &mut rng).unwrap();
        prop_assert_eq!(board.grid().cell(cells[0]), CellState::Hit);
        prop_assert_eq!(board.grid().cell(cells[1]), CellState::Hit);
        prop_assert_eq!(board.ships()[0].unwrap().hits(), 2);
    }
}
