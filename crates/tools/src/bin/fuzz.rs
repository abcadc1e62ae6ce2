use std::collections::BTreeSet;

use anyhow::Result;
use clap::Parser;
use game_core::{CoinId, Direction, Game, GameConfig, MemoryStore};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short = 'n', long, default_value_t = 2000)]
    ops: u32,
}

/// Every coin in the world: inventory plus mementos. Active caches mirror
/// their mementos, so this is the full set without double counting.
fn world_coins(game: &Game) -> Vec<CoinId> {
    let mut coins: Vec<CoinId> = game.state().player.coins.iter().map(|coin| coin.id).collect();
    for (_, memento) in game.mementos().iter() {
        coins.extend(memento.coins.iter().map(|coin| coin.id));
    }
    coins.sort_unstable();
    coins
}

fn random_cache_cell(rng: &mut ChaCha8Rng, game: &Game) -> Option<game_core::Cell> {
    let cells: Vec<game_core::Cell> = game.state().caches.keys().copied().collect();
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.next_u64() as usize % cells.len()])
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} ops...", args.seed, args.ops);
    let mut game = Game::new(GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut seen: BTreeSet<CoinId> = world_coins(&game).into_iter().collect();

    for op_index in 0..args.ops {
        match rng.next_u64() % 8 {
            0 => game.step(Direction::North),
            1 => game.step(Direction::South),
            2 => game.step(Direction::East),
            3 => game.step(Direction::West),
            4 => {
                if let Some(cell) = random_cache_cell(&mut rng, &game) {
                    game.collect(cell);
                }
            }
            5 => {
                if let Some(cell) = random_cache_cell(&mut rng, &game) {
                    game.deposit(cell);
                }
            }
            6 => {
                // Save/load round-trip must be lossless.
                let mut store = MemoryStore::new();
                game.save_to(&mut store).expect("fuzz save failed");
                let reloaded =
                    Game::load_from(&store, *game.config()).expect("fuzz load failed");
                assert_eq!(
                    reloaded.snapshot_hash(),
                    game.snapshot_hash(),
                    "snapshot hash changed across save/load at op {op_index}"
                );
                game = reloaded;
            }
            _ => {
                let here = game.state().player.location;
                let jump = (rng.next_u64() % 21) as f64 - 10.0;
                game.set_location(here.lat + jump * 0.0001, here.lng - jump * 0.0001);
            }
        }

        // Assert invariants
        let coins = world_coins(&game);
        let unique: BTreeSet<CoinId> = coins.iter().copied().collect();
        assert_eq!(unique.len(), coins.len(), "duplicate coin identity at op {op_index}");
        for id in &seen {
            assert!(unique.contains(id), "coin {id} vanished at op {op_index}");
        }
        for coin in &game.state().player.coins {
            assert_eq!(coin.value, 1, "coin value mutated at op {op_index}");
        }
        seen = unique;
    }

    println!("Fuzzing completed successfully.");
    println!("World now holds {} coins across {} mementos.", seen.len(), game.mementos().len());
    Ok(())
}
