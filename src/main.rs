use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::time::Duration;

use dreadnought::{
    init_logging, untried_cells, AbilityKind, AdvisedSource, CellState, Difficulty, GameEngine,
    MoveSource, Phase, RandomMoveSource, Side, GRID_SIZE,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Tier {
    Easy,
    Medium,
    Hard,
}

impl From<Tier> for Difficulty {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Easy => Difficulty::Easy,
            Tier::Medium => Difficulty::Medium,
            Tier::Hard => Difficulty::Hard,
        }
    }
}

/// Scripted demo battle: an automated gunner against the opponent move
/// source, printed turn by turn.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Tier::Medium)]
    difficulty: Tier,
    #[arg(long, default_value_t = 2000, help = "Advisory deadline in milliseconds")]
    advisor_timeout_ms: u64,
}

fn render(grid: &[[CellState; GRID_SIZE]; GRID_SIZE], title: &str) {
    println!("{}", title);
    print!("   ");
    for col in 0..GRID_SIZE {
        print!(" {}", (b'A' + col as u8) as char);
    }
    println!();
    for (r, row) in grid.iter().enumerate() {
        print!("{:>2} ", r);
        for cell in row {
            let glyph = match cell {
                CellState::Empty => '.',
                CellState::Ship => '#',
                CellState::Hit => 'X',
                CellState::Miss => 'o',
                CellState::Sunk => '*',
            };
            print!(" {}", glyph);
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let difficulty: Difficulty = cli.difficulty.into();

    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut engine = match cli.seed {
        Some(s) => GameEngine::seeded(difficulty, s),
        None => GameEngine::new(difficulty),
    };
    let mut gunner_rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(1)),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let mut source: Box<dyn MoveSource> = match difficulty {
        Difficulty::Hard => Box::new(AdvisedSource::new(
            RandomMoveSource::new(),
            Duration::from_millis(cli.advisor_timeout_ms),
        )),
        _ => Box::new(RandomMoveSource::new()),
    };

    engine.auto_deploy()?;

    let mut turn = 0usize;
    while engine.phase() != Phase::GameOver {
        turn += 1;

        // A light demo script: try each special weapon once mid-game.
        if turn == 5 {
            engine.toggle_ability(AbilityKind::PulseCannon);
        }
        if turn == 10 {
            engine.toggle_ability(AbilityKind::Obliterator);
        }

        let snapshot = engine.snapshot();
        let candidates = untried_cells(&snapshot.opponent_grid);
        if candidates.is_empty() {
            break;
        }
        let target = candidates[gunner_rng.random_range(0..candidates.len())];
        engine.fire(target.row, target.col);

        if engine.phase() == Phase::OpponentTurn {
            engine.opponent_turn(&mut *source).await;
        }

        let snapshot = engine.snapshot();
        println!("--- turn {} ---", turn);
        render(&snapshot.player_grid, "Your waters:");
        render(&snapshot.opponent_grid, "Enemy waters:");
        for line in snapshot.log.iter().rev().take(6).rev() {
            println!("  {}", line);
        }
    }

    let snapshot = engine.snapshot();
    match snapshot.winner {
        Some(Side::Player) => println!("\nVictory in {} turns.", turn),
        Some(Side::Opponent) => println!("\nDefeat after {} turns.", turn),
        None => println!("\nBattle abandoned after {} turns.", turn),
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
