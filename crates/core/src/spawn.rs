//! Neighborhood cache generation.
//!
//! Rebuilds the full active window around the player on every move:
//! memento-backed cells always rematerialize, never-visited cells get a
//! hash-gated spawn decision keyed on their absolute coordinates.

use std::collections::BTreeMap;

use crate::luck::{initial_coin_count, luck, spawn_key};
use crate::memento::{CacheMemento, MementoStore};
use crate::state::Cache;
use crate::types::{Cell, Coin, CoinId, GameConfig, LatLng, LogEvent};

/// Face value of every minted coin.
pub const COIN_VALUE: u32 = 1;

/// Replace the active cache window for the neighborhood around
/// `player_location`. Newly spawned caches are written through to the
/// memento store before the window is returned.
pub(crate) fn rebuild_window(
    player_location: LatLng,
    config: &GameConfig,
    mementos: &mut MementoStore,
    log: &mut Vec<LogEvent>,
) -> BTreeMap<Cell, Cache> {
    let mut caches = BTreeMap::new();
    let radius = config.neighborhood_radius;

    for di in -radius..=radius {
        for dj in -radius..=radius {
            // Candidate locations track the player's continuous position,
            // not cell centers; the containing cell is derived from them.
            let location = player_location
                .offset(f64::from(di) * config.tile_degrees, f64::from(dj) * config.tile_degrees);
            let cell = Cell::containing(location, config.tile_degrees);

            // Boundary-aligned positions can floor two offsets into the same
            // cell; the first pass owns it.
            if caches.contains_key(&cell) {
                continue;
            }

            if let Some(memento) = mementos.get(cell) {
                let cache = memento.materialize();
                log.push(LogEvent::CacheRestored { cell, coin_count: cache.coins.len() });
                caches.insert(cell, cache);
            } else if luck(&spawn_key(cell)) < config.spawn_probability {
                let cache = Cache { location, coins: mint_coins(cell) };
                mementos.set(cell, CacheMemento::of(&cache));
                log.push(LogEvent::CacheSpawned { cell, coin_count: cache.coins.len() });
                caches.insert(cell, cache);
            }
        }
    }

    caches
}

/// Mint the initial coin set for a cell: serials `0..count`, value 1 each.
pub fn mint_coins(cell: Cell) -> Vec<Coin> {
    (0..initial_coin_count(cell))
        .map(|serial| Coin { id: CoinId { i: cell.i, j: cell.j, serial }, value: COIN_VALUE })
        .collect()
}
