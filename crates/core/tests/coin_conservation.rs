use std::collections::BTreeSet;

use core::{CoinId, Direction, Game, GameConfig, MemoryStore};
use proptest::{
    arbitrary::any,
    collection::vec,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

/// Every coin currently in the world: player inventory plus all mementos.
/// Active caches mirror their mementos, so they are not counted twice.
fn world_coins(game: &Game) -> Vec<CoinId> {
    let mut coins: Vec<CoinId> =
        game.state().player.coins.iter().map(|coin| coin.id).collect();
    for (_, memento) in game.mementos().iter() {
        coins.extend(memento.coins.iter().map(|coin| coin.id));
    }
    coins.sort_unstable();
    coins
}

fn apply_op(game: &mut Game, op: u8) {
    match op % 6 {
        0 => game.step(Direction::North),
        1 => game.step(Direction::South),
        2 => game.step(Direction::East),
        3 => game.step(Direction::West),
        4 => {
            if let Some(cell) = game.state().caches.keys().next().copied() {
                game.collect(cell);
            }
        }
        _ => {
            if let Some(cell) = game.state().caches.keys().last().copied() {
                game.deposit(cell);
            }
        }
    }
}

fn check_conservation(ops: &[u8]) -> Result<(), String> {
    let mut game = Game::new(GameConfig::default());
    let mut seen: BTreeSet<CoinId> = world_coins(&game).into_iter().collect();

    for &op in ops {
        apply_op(&mut game, op);

        let coins = world_coins(&game);
        let unique: BTreeSet<CoinId> = coins.iter().copied().collect();
        if unique.len() != coins.len() {
            return Err("duplicate coin identity".to_string());
        }
        for id in &seen {
            if !unique.contains(id) {
                return Err(format!("coin {id} vanished"));
            }
        }
        seen = unique;
    }
    Ok(())
}

fn check_round_trip(ops: &[u8]) -> Result<(), String> {
    let mut game = Game::new(GameConfig::default());
    for &op in ops {
        apply_op(&mut game, op);
    }

    let mut store = MemoryStore::new();
    game.save_to(&mut store).map_err(|err| format!("save failed: {err}"))?;
    let reloaded = Game::load_from(&store, *game.config())
        .map_err(|err| format!("load failed: {err}"))?;

    if reloaded.snapshot_hash() != game.snapshot_hash() {
        return Err("snapshot hash changed across save/load".to_string());
    }
    if world_coins(&reloaded) != world_coins(&game) {
        return Err("coin census changed across save/load".to_string());
    }
    Ok(())
}

fn check_collect_then_deposit(steps: &[u8]) -> Result<(), String> {
    let mut game = Game::new(GameConfig::default());
    for &step in steps {
        apply_op(&mut game, step);
    }

    let Some(cell) = game.state().caches.keys().next().copied() else {
        return Ok(());
    };
    let inventory_before = game.state().player.coins.len();
    let cache_before = game.state().caches[&cell].coins.len();

    let collected = game.collect(cell);
    if collected != cache_before {
        return Err(format!("collected {collected}, cache held {cache_before}"));
    }
    if game.state().player.coins.len() != inventory_before + collected {
        return Err("inventory did not grow by the collected count".to_string());
    }

    let deposited = game.deposit(cell);
    if deposited != inventory_before + collected {
        return Err(format!("deposited {deposited}, inventory held {}", inventory_before + collected));
    }
    if !game.state().player.coins.is_empty() {
        return Err("inventory not emptied by deposit".to_string());
    }
    if game.state().caches[&cell].coins.len() != deposited {
        return Err("cache does not hold every deposited coin".to_string());
    }
    Ok(())
}

#[test]
fn random_walks_never_invent_or_drop_coins() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    runner
        .run(&vec(any::<u8>(), 1..120), |ops| {
            check_conservation(&ops).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("random walks should conserve coin identities");
}

#[test]
fn save_load_round_trip_is_lossless_under_random_walks() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    runner
        .run(&vec(any::<u8>(), 1..60), |ops| {
            check_round_trip(&ops).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("save/load should preserve the world exactly");
}

#[test]
fn collect_then_deposit_is_exact() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    runner
        .run(&vec(0u8..4, 0..20), |steps| {
            check_collect_then_deposit(&steps).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("collect then deposit should move exact coin counts");
}
